//! Built-in decks for the home page carousels.

use jamalie_carousel::{DeckError, ImageSources, SlideDeck, SlideItem};

/// Number of gallery cards the strip's scroll container holds.
pub const GALLERY_ITEMS: usize = 6;

/// Horizontal padding around the gallery cards inside the scroll container.
pub const GALLERY_PADDING: f32 = 24.0;

/// The hero image slider: four mood shots with headline copy.
pub fn hero_deck() -> Result<SlideDeck, DeckError> {
    SlideDeck::new(vec![
        SlideItem::new(
            1,
            ImageSources::single("mood (2).jpeg"),
            "Artisan Craftsmanship",
            "Handcrafted with precision and passion",
        ),
        SlideItem::new(
            2,
            ImageSources::single("mood (3).jpeg"),
            "Premium Materials",
            "Only the finest materials make the cut",
        ),
        SlideItem::new(
            3,
            ImageSources::single("mood(4).jpeg"),
            "Timeless Design",
            "Elegance that transcends trends",
        ),
        SlideItem::new(
            4,
            ImageSources::single("mood (1).jpeg"),
            "Luxury Collection",
            "Discover our signature pieces",
        ),
    ])
}

/// The story gallery strip. Captions double as titles; there is no subtitle.
pub fn gallery_deck() -> Result<SlideDeck, DeckError> {
    let items = [
        (1, "story (5).jpg", "Moodboard"),
        (2, "story (3).jpg", "Behind the Brand"),
        (3, "story (4).jpg", "Inspo"),
        (4, "story(6).jpg", "Lookbook"),
        (5, "story (1).jpg", "Textures"),
        (6, "story (2).jpg", "Craftsmanship"),
    ];
    SlideDeck::new(
        items
            .into_iter()
            .map(|(id, image, caption)| {
                SlideItem::new(id, ImageSources::single(image), caption, "")
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decks_are_valid() {
        let hero = hero_deck().unwrap();
        assert_eq!(hero.len(), 4);
        assert_eq!(hero.get(0).unwrap().title, "Artisan Craftsmanship");
        assert_eq!(
            hero.get(3).unwrap().image.for_viewport(1440.0),
            "mood (1).jpeg"
        );

        let gallery = gallery_deck().unwrap();
        assert_eq!(gallery.len(), GALLERY_ITEMS);
        assert!(gallery.iter().all(|item| item.subtitle.is_empty()));
    }
}
