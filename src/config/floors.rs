use crate::config::types::SkipOverrideEntry;
use crate::crawler::FloorSpec;

/// The library floors, in output order
///
/// The first floor lists books on bulleted shelves followed by a table; the
/// upper floors only have tables. The second floor's table also links the
/// book index, which is not a book.
pub fn default_floors() -> Vec<FloorSpec> {
    vec![
        FloorSpec {
            name: "First Floor".to_string(),
            path: "/wiki/First_Floor".to_string(),
            shelves: 8,
            table: true,
            exclusions: vec![],
        },
        FloorSpec {
            name: "Second Floor".to_string(),
            path: "/wiki/Second_Floor".to_string(),
            shelves: 0,
            table: true,
            exclusions: vec!["/wiki/Book_Index".to_string()],
        },
        FloorSpec {
            name: "Third Floor".to_string(),
            path: "/wiki/Third_Floor".to_string(),
            shelves: 0,
            table: true,
            exclusions: vec![],
        },
    ]
}

/// Item pages whose layout puts extra elements between the first section
/// heading and the acquisition block
pub fn default_skip_overrides() -> Vec<SkipOverrideEntry> {
    vec![SkipOverrideEntry {
        title: "Codex of Echoes".to_string(),
        extra_skip: 1,
    }]
}
