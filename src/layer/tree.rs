//! Group reconstruction from the flat layer list.
//!
//! Groups are stored as a pair of pseudo-layers: the named folder record
//! above its children and a close marker below them. Walking the records
//! top-down with a stack of open group names is enough to recover paths.

use alloc::string::String;
use alloc::vec::Vec;

use super::RawLayer;
use crate::error::PsdError;

/// Name Photoshop gives the record that closes a group.
pub(crate) const GROUP_END_NAME: &str = "</Layer group>";

/// A drawable layer and where it sits in the group tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    /// Index into the raw layer list (file order).
    pub index: usize,
    pub path: Vec<String>,
}

/// Resolve paths for every non-group layer, topmost first.
pub(crate) fn resolve_paths(layers: &[RawLayer]) -> Result<Vec<Placement>, PsdError> {
    let mut groups: Vec<&str> = Vec::new();
    let mut placements = Vec::new();

    for (index, layer) in layers.iter().enumerate().rev() {
        if layer.is_group() {
            if layer.name == GROUP_END_NAME {
                groups
                    .pop()
                    .ok_or(PsdError::InvalidGroupStructure { layer: index })?;
            } else {
                groups.push(&layer.name);
            }
            continue;
        }

        let mut path: Vec<String> = groups.iter().map(|&g| String::from(g)).collect();
        path.push(layer.name.clone());
        placements.push(Placement { index, path });
    }

    if !groups.is_empty() {
        log::debug!("{} groups left open at end of layer list", groups.len());
    }
    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlendMode, Bounds};
    use crate::layer::GROUP_FLAGS;
    use alloc::string::ToString;
    use alloc::vec;

    fn raw(name: &str, flags: u8) -> RawLayer {
        RawLayer {
            bounds: Bounds::default(),
            name: name.into(),
            blend_mode: BlendMode::NORMAL,
            opacity: 255,
            clipping: 0,
            flags,
            channels: Vec::new(),
        }
    }

    /// Build the on-disk (bottom-first) list from a top-first description.
    fn stored(top_first: &[(&str, u8)]) -> Vec<RawLayer> {
        top_first.iter().rev().map(|&(n, f)| raw(n, f)).collect()
    }

    #[test]
    fn nested_groups() {
        let layers = stored(&[
            ("Outer", GROUP_FLAGS),
            ("Inner", GROUP_FLAGS),
            ("a", 0),
            (GROUP_END_NAME, GROUP_FLAGS),
            ("b", 0),
            (GROUP_END_NAME, GROUP_FLAGS),
            ("c", 0),
        ]);
        let placements = resolve_paths(&layers).unwrap();
        let paths: Vec<Vec<String>> = placements.iter().map(|p| p.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                vec!["Outer".to_string(), "Inner".into(), "a".into()],
                vec!["Outer".to_string(), "b".into()],
                vec!["c".to_string()],
            ]
        );
        // Indices point back into file order.
        assert_eq!(placements[0].index, 4);
        assert_eq!(placements[2].index, 0);
    }

    #[test]
    fn only_both_flag_bits_make_a_group() {
        let layers = stored(&[("z", 0x1a), ("x", 0x08), ("y", 0x10)]);
        let placements = resolve_paths(&layers).unwrap();
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[1].path, ["z", "y"]);
    }

    #[test]
    fn close_without_open_fails() {
        let layers = stored(&[("a", 0), (GROUP_END_NAME, GROUP_FLAGS)]);
        match resolve_paths(&layers) {
            Err(PsdError::InvalidGroupStructure { layer }) => assert_eq!(layer, 0),
            other => panic!("expected InvalidGroupStructure, got {other:?}"),
        }
    }

    #[test]
    fn sentinel_name_on_normal_layer_is_a_layer() {
        let layers = stored(&[(GROUP_END_NAME, 0)]);
        let placements = resolve_paths(&layers).unwrap();
        assert_eq!(placements[0].path, [GROUP_END_NAME]);
    }
}
