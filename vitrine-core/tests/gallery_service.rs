//! End-to-end exercises of the ordering and publication rules over the
//! in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use vitrine_core::blob::{BlobStore, MemoryBlobStore};
use vitrine_core::store::MemoryStore;
use vitrine_core::{
    AlbumChanges, CreatePhotoRequest, GalleryError, GalleryService, MoveDirection, Photo,
    UploadPhoto,
};

fn service() -> (GalleryService, Arc<MemoryBlobStore>) {
    let store = Arc::new(MemoryStore::new());
    let blobs = Arc::new(MemoryBlobStore::new("https://blobs.test"));
    (
        GalleryService::new(store.clone(), store, blobs.clone()),
        blobs,
    )
}

async fn upload(
    gallery: &GalleryService,
    album_id: Option<vitrine_core::AlbumId>,
    name: &str,
) -> Photo {
    gallery
        .upload_photo(UploadPhoto {
            album_id,
            filename: format!("{name}.jpg"),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xffu8; 16],
            width: None,
            height: None,
            title: Some(name.to_string()),
        })
        .await
        .expect("upload should succeed")
}

#[tokio::test]
async fn albums_append_in_creation_order() {
    let (gallery, _) = service();

    let first = gallery.create_album("First", None).await.unwrap();
    let second = gallery.create_album("Second", None).await.unwrap();
    let third = gallery.create_album("Third", None).await.unwrap();

    assert!(first.sort_index < second.sort_index);
    assert!(second.sort_index < third.sort_index);
    assert_eq!(first.sort_index, 1);
}

#[tokio::test]
async fn reorder_matches_requested_permutation() {
    let (gallery, _) = service();
    let album = gallery.create_album("Gallery", None).await.unwrap();

    let mut photos = Vec::new();
    for name in ["p1", "p2", "p3", "p4", "p5"] {
        photos.push(upload(&gallery, Some(album.id), name).await);
    }

    let permutation = [
        photos[2].id,
        photos[0].id,
        photos[4].id,
        photos[1].id,
        photos[3].id,
    ];
    gallery.reorder_photos(&permutation).await.unwrap();
    let listed = gallery.list_album_photos(album.id).await.unwrap();
    let listed_ids: Vec<_> = listed.iter().map(|p| p.id).collect();
    assert_eq!(listed_ids, permutation);

    let second = [
        photos[4].id,
        photos[3].id,
        photos[2].id,
        photos[1].id,
        photos[0].id,
    ];
    gallery.reorder_photos(&second).await.unwrap();
    let listed = gallery.list_album_photos(album.id).await.unwrap();
    let listed_ids: Vec<_> = listed.iter().map(|p| p.id).collect();
    assert_eq!(listed_ids, second);
}

#[tokio::test]
async fn unpublished_photos_are_hidden_from_public_reads() {
    let (gallery, _) = service();
    let album = gallery.create_album("Launch", None).await.unwrap();

    let a = upload(&gallery, Some(album.id), "a").await;
    let b = upload(&gallery, Some(album.id), "b").await;
    let c = upload(&gallery, Some(album.id), "c").await;

    gallery.set_photo_published(b.id, false).await.unwrap();

    let public = gallery.list_public_album_photos(album.id).await.unwrap();
    let ids: Vec<_> = public.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a.id, c.id]);
    assert!(public.windows(2).all(|w| w[0].sort_index <= w[1].sort_index));
}

#[tokio::test]
async fn deleting_an_album_cascades_to_its_photos_and_blobs() {
    let (gallery, blobs) = service();
    let album = gallery.create_album("Doomed", None).await.unwrap();
    for name in ["a", "b", "c", "d"] {
        upload(&gallery, Some(album.id), name).await;
    }
    assert_eq!(blobs.object_count(), 4);

    gallery.delete_album(album.id).await.unwrap();

    assert!(matches!(
        gallery.list_album_photos(album.id).await,
        Err(GalleryError::NotFound(_))
    ));
    assert_eq!(blobs.object_count(), 0);

    // Second delete targets a gone id.
    assert!(matches!(
        gallery.delete_album(album.id).await,
        Err(GalleryError::NotFound(_))
    ));
}

#[tokio::test]
async fn attach_orphans_appends_and_is_quiet_when_empty() {
    let (gallery, _) = service();
    let album = gallery.create_album("Home", None).await.unwrap();
    let existing = upload(&gallery, Some(album.id), "existing").await;

    let o1 = upload(&gallery, None, "orphan1").await;
    let o2 = upload(&gallery, None, "orphan2").await;

    let moved = gallery.attach_orphans(album.id).await.unwrap();
    assert_eq!(moved, 2);

    let listed = gallery.list_album_photos(album.id).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![existing.id, o1.id, o2.id]);
    assert!(listed.windows(2).all(|w| w[0].sort_index < w[1].sort_index));

    let moved = gallery.attach_orphans(album.id).await.unwrap();
    assert_eq!(moved, 0);
    let unchanged = gallery.list_album_photos(album.id).await.unwrap();
    assert_eq!(
        unchanged.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![existing.id, o1.id, o2.id]
    );
}

#[tokio::test]
async fn moving_past_the_boundary_is_a_noop() {
    let (gallery, _) = service();
    let album = gallery.create_album("Edges", None).await.unwrap();
    let first = upload(&gallery, Some(album.id), "first").await;
    let second = upload(&gallery, Some(album.id), "second").await;

    gallery
        .move_photo(first.id, MoveDirection::Up)
        .await
        .unwrap();
    gallery
        .move_photo(second.id, MoveDirection::Down)
        .await
        .unwrap();

    let listed = gallery.list_album_photos(album.id).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn move_swaps_with_the_adjacent_photo() {
    let (gallery, _) = service();
    let album = gallery.create_album("Swap", None).await.unwrap();
    let a = upload(&gallery, Some(album.id), "a").await;
    let b = upload(&gallery, Some(album.id), "b").await;
    let c = upload(&gallery, Some(album.id), "c").await;

    gallery.move_photo(c.id, MoveDirection::Up).await.unwrap();

    let listed = gallery.list_album_photos(album.id).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a.id, c.id, b.id]);
}

#[tokio::test]
async fn summer_album_scenario() {
    let (gallery, _) = service();

    let summer = gallery.create_album("Summer", None).await.unwrap();
    assert_eq!(summer.sort_index, 1);

    let a = upload(&gallery, Some(summer.id), "A").await;
    let b = upload(&gallery, Some(summer.id), "B").await;
    let c = upload(&gallery, Some(summer.id), "C").await;
    assert_eq!(
        (a.sort_index, b.sort_index, c.sort_index),
        (1, 2, 3)
    );
    assert!(a.published && b.published && c.published);

    gallery.reorder_photos(&[c.id, a.id, b.id]).await.unwrap();
    let listed = gallery.list_album_photos(summer.id).await.unwrap();
    assert_eq!(
        listed.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![c.id, a.id, b.id]
    );

    gallery.set_photo_published(b.id, false).await.unwrap();
    let public = gallery.list_public_album_photos(summer.id).await.unwrap();
    assert_eq!(
        public.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![c.id, a.id]
    );
}

#[tokio::test]
async fn public_album_listing_has_cover_and_count() {
    let (gallery, _) = service();
    let visible = gallery.create_album("Visible", None).await.unwrap();
    let hidden = gallery.create_album("Hidden", None).await.unwrap();
    gallery
        .set_album_published(hidden.id, false)
        .await
        .unwrap();

    let cover = upload(&gallery, Some(visible.id), "cover").await;
    let extra = upload(&gallery, Some(visible.id), "extra").await;
    gallery.set_photo_published(extra.id, false).await.unwrap();

    let listed = gallery.list_public_albums().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, visible.id);
    assert_eq!(listed[0].cover_url.as_deref(), Some(cover.url.as_str()));
    assert_eq!(listed[0].photo_count, 1);
}

#[tokio::test]
async fn unpublished_albums_are_not_publicly_readable() {
    let (gallery, _) = service();
    let album = gallery.create_album("Draft", None).await.unwrap();
    upload(&gallery, Some(album.id), "p").await;
    gallery.set_album_published(album.id, false).await.unwrap();

    assert!(matches!(
        gallery.list_public_album_photos(album.id).await,
        Err(GalleryError::NotFound(_))
    ));
}

#[tokio::test]
async fn validation_failures_are_rejected() {
    let (gallery, _) = service();

    assert!(matches!(
        gallery.create_album("   ", None).await,
        Err(GalleryError::Validation(_))
    ));

    assert!(matches!(
        gallery
            .create_photo(CreatePhotoRequest {
                album_id: None,
                url: "".to_string(),
                width: None,
                height: None,
                title: None,
            })
            .await,
        Err(GalleryError::Validation(_))
    ));

    assert!(matches!(
        gallery.reorder_photos(&[]).await,
        Err(GalleryError::Validation(_))
    ));

    let stranger = vitrine_core::AlbumId::new();
    assert!(matches!(
        gallery.attach_orphans(stranger).await,
        Err(GalleryError::Validation(_))
    ));

    let album = gallery.create_album("Real", None).await.unwrap();
    assert!(matches!(
        gallery
            .update_album(
                album.id,
                AlbumChanges {
                    title: Some("  ".to_string()),
                    ..Default::default()
                },
            )
            .await,
        Err(GalleryError::Validation(_))
    ));
}

#[tokio::test]
async fn reorder_with_only_unknown_ids_is_rejected() {
    let (gallery, _) = service();
    let album = gallery.create_album("Known", None).await.unwrap();
    upload(&gallery, Some(album.id), "p").await;

    assert!(matches!(
        gallery.reorder_photos(&[vitrine_core::PhotoId::new()]).await,
        Err(GalleryError::Validation(_))
    ));
}

/// Blob store that refuses every delete; stands in for a flaky object
/// storage service.
#[derive(Debug)]
struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn put(&self, key: &str, _bytes: Vec<u8>, _content_type: &str) -> vitrine_core::Result<String> {
        Ok(format!("https://blobs.test/{key}"))
    }

    async fn delete(&self, url: &str) -> vitrine_core::Result<()> {
        Err(GalleryError::Store(format!("unreachable: {url}")))
    }
}

#[tokio::test]
async fn blob_delete_failure_does_not_fail_the_row_delete() {
    let store = Arc::new(MemoryStore::new());
    let gallery = GalleryService::new(store.clone(), store, Arc::new(FailingBlobStore));

    let album = gallery.create_album("Flaky", None).await.unwrap();
    let photo = upload(&gallery, Some(album.id), "p").await;

    gallery.delete_photo(photo.id).await.unwrap();
    assert!(matches!(
        gallery.delete_photo(photo.id).await,
        Err(GalleryError::NotFound(_))
    ));

    // Cascade path swallows blob failures too.
    upload(&gallery, Some(album.id), "q").await;
    gallery.delete_album(album.id).await.unwrap();
}

#[tokio::test]
async fn upload_writes_blob_then_row() {
    let (gallery, blobs) = service();
    let album = gallery.create_album("Uploads", None).await.unwrap();

    let photo = upload(&gallery, Some(album.id), "shot").await;
    assert!(photo.url.starts_with("https://blobs.test/albums/"));
    assert!(blobs.contains(&photo.url));

    gallery.delete_photo(photo.id).await.unwrap();
    assert!(!blobs.contains(&photo.url));
}

#[tokio::test]
async fn empty_upload_is_rejected() {
    let (gallery, blobs) = service();
    let result = gallery
        .upload_photo(UploadPhoto {
            album_id: None,
            filename: "empty.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: Vec::new(),
            width: None,
            height: None,
            title: None,
        })
        .await;
    assert!(matches!(result, Err(GalleryError::Validation(_))));
    assert_eq!(blobs.object_count(), 0);
}
