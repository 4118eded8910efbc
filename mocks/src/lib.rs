use catalog::{Catalog, Category, MediaItem, MediaType};
use std::sync::Arc;

/// Build a media item with a predictable asset path.
pub fn item(id: u32, media_type: MediaType, category: Category) -> MediaItem {
    let ext = match media_type {
        MediaType::Image => "png",
        MediaType::Video => "mp4",
    };
    MediaItem {
        id,
        src: format!("/portfolio-content/{}.{}", id, ext),
        media_type,
        category,
    }
}

/// Catalog with ids `1..=n`, cycling through every category. Every third
/// item is a video.
pub fn catalog_of(n: u32) -> Arc<Catalog> {
    let items = (1..=n)
        .map(|id| {
            let category = Category::ALL[(id as usize - 1) % Category::ALL.len()];
            let media_type = if id % 3 == 0 { MediaType::Video } else { MediaType::Image };
            item(id, media_type, category)
        })
        .collect();
    Arc::new(Catalog::new(items).expect("mock ids are unique"))
}

/// `n` items that all belong to `category`.
pub fn single_category(n: u32, category: Category) -> Arc<Catalog> {
    let items = (1..=n).map(|id| item(id, MediaType::Image, category)).collect();
    Arc::new(Catalog::new(items).expect("mock ids are unique"))
}

/// The three-item scenario: A (image, Logo), B (video, Banner), C (image, Logo)
/// with ids 1, 2, 3.
pub fn abc_catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new(vec![
            item(1, MediaType::Image, Category::Logo),
            item(2, MediaType::Video, Category::Banner),
            item(3, MediaType::Image, Category::Logo),
        ])
        .expect("mock ids are unique"),
    )
}
