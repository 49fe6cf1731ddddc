use crate::{Entry, EntryId};

/// The catalogue installed when nothing usable has been stored yet.
pub fn seed_entries() -> Vec<Entry> {
    vec![
        Entry {
            id: EntryId::from("1"),
            title: "Inception".to_string(),
            playback_url: "https://www.youtube.com/watch?v=8hP9D6kZseM".to_string(),
            poster_url: "https://images.unsplash.com/photo-1626814026160-2237a95fc5a0?q=80&w=1200&auto=format&fit=crop".to_string(),
            description: Some(
                "A thief who steals corporate secrets through the use of dream-sharing technology."
                    .to_string(),
            ),
            category: "Sci-Fi".to_string(),
            year: Some("2010".to_string()),
            rating: Some("8.8".to_string()),
        },
        Entry {
            id: EntryId::from("2"),
            title: "The Batman".to_string(),
            playback_url: "https://www.youtube.com/watch?v=mqqft22n0Sc".to_string(),
            poster_url: "https://images.unsplash.com/photo-1509248961158-e54f6934749c?q=80&w=1200&auto=format&fit=crop".to_string(),
            description: Some(
                "Batman ventures into Gotham City's underworld when a sadistic killer leaves behind a trail of cryptic clues."
                    .to_string(),
            ),
            category: "Action".to_string(),
            year: Some("2022".to_string()),
            rating: Some("7.8".to_string()),
        },
        Entry {
            id: EntryId::from("3"),
            title: "Interstellar".to_string(),
            playback_url: "https://www.youtube.com/watch?v=zSWdZVtXT7E".to_string(),
            poster_url: "https://images.unsplash.com/photo-1446776811953-b23d57bd21aa?q=80&w=1200&auto=format&fit=crop".to_string(),
            description: Some(
                "When Earth becomes uninhabitable, a team of researchers journeys to find a new planet."
                    .to_string(),
            ),
            category: "Sci-Fi".to_string(),
            year: Some("2014".to_string()),
            rating: Some("8.7".to_string()),
        },
    ]
}
