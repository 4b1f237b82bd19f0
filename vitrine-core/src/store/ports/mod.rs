mod albums;
mod photos;

pub use albums::AlbumStore;
pub use photos::PhotoStore;
