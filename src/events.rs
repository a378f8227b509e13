//! Slot event handling
//!
//! Front ends translate their native events (DOM listeners, iced
//! subscriptions) into [`SlotEvent`]s and carry out whatever
//! [`EventAction`]s come back. `F` is the front end's file handle.

/// Keys that open a slot's file picker
pub const ACTIVATION_KEYS: [&str; 2] = ["Enter", " "];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEvent<F> {
    /// The file input's selection changed
    Change { upload_id: String, files: Vec<F> },
    /// A key was pressed while the slot container had focus
    KeyDown { upload_id: String, key: String },
    DragOver { zone: String },
    DragEnter { zone: String },
    DragLeave { zone: String },
    DragEnd { zone: String },
    /// Files were dropped on a zone; `upload_id` is the zone's file input, if any
    Drop {
        zone: String,
        upload_id: Option<String>,
        files: Vec<F>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventAction<F> {
    /// Suppress the platform's default handling (scrolling, opening the file)
    PreventDefault,
    OpenPicker { upload_id: String },
    SetDragActive { zone: String, active: bool },
    /// Validate, read and store this file for the slot
    Process { upload_id: String, file: F },
}

pub fn is_activation_key(key: &str) -> bool {
    ACTIVATION_KEYS.contains(&key)
}

/// Map one event to the actions the front end should perform, in order
pub fn dispatch<F>(event: SlotEvent<F>) -> Vec<EventAction<F>> {
    match event {
        SlotEvent::Change { upload_id, files } => files
            .into_iter()
            .next()
            .map(|file| EventAction::Process { upload_id, file })
            .into_iter()
            .collect(),

        SlotEvent::KeyDown { upload_id, key } => {
            if is_activation_key(&key) {
                vec![EventAction::PreventDefault, EventAction::OpenPicker { upload_id }]
            } else {
                Vec::new()
            }
        }

        SlotEvent::DragOver { zone } => vec![
            EventAction::PreventDefault,
            EventAction::SetDragActive { zone, active: true },
        ],

        SlotEvent::DragEnter { zone } | SlotEvent::DragLeave { zone } | SlotEvent::DragEnd { zone } => {
            vec![EventAction::SetDragActive { zone, active: false }]
        }

        SlotEvent::Drop { zone, upload_id, files } => {
            let mut actions = vec![
                EventAction::PreventDefault,
                EventAction::SetDragActive { zone, active: false },
            ];
            if let (Some(upload_id), Some(file)) = (upload_id, files.into_iter().next()) {
                actions.push(EventAction::Process { upload_id, file });
            }
            actions
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> String {
        "zone1".to_string()
    }

    #[test]
    fn test_change_processes_first_file_only() {
        let actions = dispatch(SlotEvent::Change {
            upload_id: "photo1Upload".into(),
            files: vec!["a.png", "b.png"],
        });
        assert_eq!(
            actions,
            vec![EventAction::Process { upload_id: "photo1Upload".into(), file: "a.png" }]
        );
    }

    #[test]
    fn test_change_without_files_does_nothing() {
        let actions = dispatch::<&str>(SlotEvent::Change {
            upload_id: "photo1Upload".into(),
            files: vec![],
        });
        assert!(actions.is_empty());
    }

    #[test]
    fn test_enter_and_space_open_picker() {
        for key in ["Enter", " "] {
            let actions = dispatch::<&str>(SlotEvent::KeyDown {
                upload_id: "photo1Upload".into(),
                key: key.into(),
            });
            assert_eq!(
                actions,
                vec![
                    EventAction::PreventDefault,
                    EventAction::OpenPicker { upload_id: "photo1Upload".into() },
                ]
            );
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        for key in ["Tab", "a", "Escape", "Spacebar"] {
            let actions = dispatch::<&str>(SlotEvent::KeyDown {
                upload_id: "photo1Upload".into(),
                key: key.into(),
            });
            assert!(actions.is_empty(), "{}", key);
        }
    }

    #[test]
    fn test_drag_over_activates_and_others_clear() {
        assert_eq!(
            dispatch::<&str>(SlotEvent::DragOver { zone: zone() }),
            vec![
                EventAction::PreventDefault,
                EventAction::SetDragActive { zone: zone(), active: true },
            ]
        );
        for event in [
            SlotEvent::<&str>::DragEnter { zone: zone() },
            SlotEvent::DragLeave { zone: zone() },
            SlotEvent::DragEnd { zone: zone() },
        ] {
            assert_eq!(dispatch(event), vec![EventAction::SetDragActive { zone: zone(), active: false }]);
        }
    }

    #[test]
    fn test_drop_clears_styling_and_processes_first_file() {
        let actions = dispatch(SlotEvent::Drop {
            zone: zone(),
            upload_id: Some("photo1Upload".into()),
            files: vec!["poster.png", "other.png"],
        });
        assert_eq!(
            actions,
            vec![
                EventAction::PreventDefault,
                EventAction::SetDragActive { zone: zone(), active: false },
                EventAction::Process { upload_id: "photo1Upload".into(), file: "poster.png" },
            ]
        );
    }

    #[test]
    fn test_empty_drop_or_zone_without_input_only_clears_styling() {
        let expected = vec![
            EventAction::PreventDefault,
            EventAction::SetDragActive { zone: zone(), active: false },
        ];
        assert_eq!(
            dispatch::<&str>(SlotEvent::Drop {
                zone: zone(),
                upload_id: Some("photo1Upload".into()),
                files: vec![],
            }),
            expected
        );
        assert_eq!(
            dispatch(SlotEvent::Drop {
                zone: zone(),
                upload_id: None,
                files: vec!["a.png"],
            }),
            expected
        );
    }
}
