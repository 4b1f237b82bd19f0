use uuid::Uuid;

/// Strongly typed ID for albums.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct AlbumId(pub Uuid);

impl Default for AlbumId {
    fn default() -> Self {
        Self::new()
    }
}

impl AlbumId {
    /// UUIDv7, so newer ids sort after older ones.
    pub fn new() -> Self {
        AlbumId(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for AlbumId {
    fn from(id: Uuid) -> Self {
        AlbumId(id)
    }
}

impl std::fmt::Display for AlbumId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for photos.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct PhotoId(pub Uuid);

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoId {
    /// UUIDv7, so newer ids sort after older ones. Orphan attachment relies
    /// on this to preserve upload order.
    pub fn new() -> Self {
        PhotoId(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for PhotoId {
    fn from(id: Uuid) -> Self {
        PhotoId(id)
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
