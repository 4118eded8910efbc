use catalog::Category;
use gallery::{Filter, GalleryController, LightboxKey, Message, PAGE_SIZE};
use mocks::{abc_catalog, catalog_of, single_category};

fn ids(items: Vec<&catalog::MediaItem>) -> Vec<u32> {
    items.into_iter().map(|i| i.id).collect()
}

#[test]
fn test_initial_state() {
    let gallery = GalleryController::new(catalog_of(30));
    assert_eq!(gallery.active_category(), Filter::All);
    assert_eq!(gallery.visible_count(), PAGE_SIZE);
    assert_eq!(gallery.filtered_items().len(), 30);
    assert_eq!(ids(gallery.visible_items()), (1..=12).collect::<Vec<_>>());
    assert!(gallery.has_more());
    assert!(!gallery.is_open());
}

#[test]
fn test_set_category_filters_in_catalog_order() {
    let catalog = catalog_of(40);
    let mut gallery = GalleryController::new(catalog.clone());
    for category in Category::ALL {
        gallery.set_category(category);
        let expected: Vec<u32> = catalog
            .iter()
            .filter(|i| i.category == category)
            .map(|i| i.id)
            .collect();
        assert_eq!(ids(gallery.filtered_items()), expected);
        assert_eq!(gallery.active_category(), Filter::Only(category));
    }
    gallery.set_category(Filter::All);
    assert_eq!(gallery.filtered_items().len(), 40);
}

#[test]
fn test_set_category_resets_visible_count() {
    let mut gallery = GalleryController::new(catalog_of(50));
    gallery.load_more();
    assert_eq!(gallery.visible_count(), 24);

    // Same filter again still resets.
    gallery.set_category(Filter::All);
    assert_eq!(gallery.visible_count(), 12);

    gallery.load_more();
    gallery.set_category(Category::Logo);
    assert_eq!(gallery.visible_count(), 10);
    assert!(!gallery.has_more());
}

#[test]
fn test_load_more_is_monotonic_and_clamped() {
    let mut gallery = GalleryController::new(catalog_of(30));
    let mut last = gallery.visible_count();
    while gallery.has_more() {
        gallery.load_more();
        assert!(gallery.visible_count() > last);
        assert!(gallery.visible_count() <= gallery.filtered_items().len());
        last = gallery.visible_count();
    }
    assert_eq!(last, 30);
    for _ in 0..5 {
        gallery.load_more();
        assert_eq!(gallery.visible_count(), 30);
    }
    assert_eq!(gallery.visible_items().len(), 30);
}

#[test]
fn test_short_filtered_list_has_no_more() {
    let mut gallery = GalleryController::new(single_category(5, Category::Emotes));
    assert!(!gallery.has_more());
    gallery.load_more();
    assert_eq!(gallery.visible_count(), 5);
    assert_eq!(gallery.visible_items().len(), 5);
}

#[test]
fn test_abc_scenario() {
    let mut gallery = GalleryController::new(abc_catalog());
    gallery.set_category(Category::Logo);
    assert_eq!(ids(gallery.filtered_items()), vec![1, 3]);

    // B is outside the filter but the lightbox cycles the full catalog.
    let b = gallery.catalog().get(2).unwrap().clone();
    assert!(gallery.open(&b));
    gallery.next();
    assert_eq!(gallery.selected().map(|i| i.id), Some(3));

    let a = gallery.catalog().get(1).unwrap().clone();
    gallery.open(&a);
    gallery.prev();
    assert_eq!(gallery.selected().map(|i| i.id), Some(3));
}

#[test]
fn test_next_prev_are_inverses_with_wraparound() {
    let catalog = catalog_of(7);
    let mut gallery = GalleryController::new(catalog.clone());
    for item in catalog.iter() {
        gallery.open_id(item.id);
        gallery.next();
        gallery.prev();
        assert_eq!(gallery.selected().map(|i| i.id), Some(item.id));

        gallery.prev();
        gallery.next();
        assert_eq!(gallery.selected().map(|i| i.id), Some(item.id));
    }

    gallery.open_id(7);
    gallery.next();
    assert_eq!(gallery.selected().map(|i| i.id), Some(1));
}

#[test]
fn test_navigation_without_selection_is_noop() {
    let mut gallery = GalleryController::new(catalog_of(3));
    gallery.next();
    gallery.prev();
    assert!(gallery.selected().is_none());
}

#[test]
fn test_open_unknown_id_is_rejected() {
    let mut gallery = GalleryController::new(catalog_of(3));
    gallery.open_id(2);
    assert!(!gallery.open_id(99));
    assert_eq!(gallery.selected().map(|i| i.id), Some(2));
}

#[test]
fn test_single_item_cycles_to_itself() {
    let mut gallery = GalleryController::new(single_category(1, Category::Banner));
    gallery.open_id(1);
    gallery.next();
    assert_eq!(gallery.selected().map(|i| i.id), Some(1));
    gallery.prev();
    assert_eq!(gallery.selected().map(|i| i.id), Some(1));
}

#[test]
fn test_select_and_close_via_messages() {
    let mut gallery = GalleryController::new(catalog_of(20));
    gallery.update(Message::SelectCategory(Filter::Only(Category::Banner)));
    assert_eq!(gallery.active_category(), Filter::Only(Category::Banner));
    gallery.update(Message::Open(4));
    assert!(gallery.is_open());
    gallery.update(Message::Next);
    assert_eq!(gallery.selected().map(|i| i.id), Some(5));
    gallery.update(Message::Prev);
    gallery.update(Message::Prev);
    assert_eq!(gallery.selected().map(|i| i.id), Some(3));
    gallery.update(Message::Close);
    assert!(!gallery.is_open());
}

#[test]
fn test_lightbox_keys() {
    let mut gallery = GalleryController::new(catalog_of(5));
    // Closed lightbox ignores keys.
    gallery.update(Message::Key(LightboxKey::ArrowRight));
    assert!(gallery.selected().is_none());

    gallery.open_id(5);
    gallery.handle_key(LightboxKey::ArrowRight);
    assert_eq!(gallery.selected().map(|i| i.id), Some(1));
    gallery.handle_key(LightboxKey::ArrowLeft);
    assert_eq!(gallery.selected().map(|i| i.id), Some(5));
    gallery.handle_key(LightboxKey::Escape);
    assert!(!gallery.is_open());
}
