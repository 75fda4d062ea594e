//! The JSON payload exchanged with the hosting application: a single
//! `canvasElements` array of element records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drawing::Element;
use crate::scene::Scene;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("failed to parse canvas payload: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize canvas payload: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ScenePayload {
    #[serde(rename = "canvasElements")]
    canvas_elements: Vec<Element>,
}

#[derive(Debug, Serialize)]
struct ScenePayloadRef<'a> {
    #[serde(rename = "canvasElements")]
    canvas_elements: &'a [Element],
}

/// Serializes the scene to the host payload string.
pub fn encode_scene(scene: &Scene) -> Result<String, PayloadError> {
    let payload = ScenePayloadRef {
        canvas_elements: scene.elements(),
    };
    serde_json::to_string(&payload).map_err(PayloadError::Serialize)
}

/// Parses a payload string into its element records, in document order.
pub fn decode_scene(payload: &str) -> Result<Vec<Element>, PayloadError> {
    let payload: ScenePayload = serde_json::from_str(payload).map_err(PayloadError::Parse)?;
    Ok(payload.canvas_elements)
}

/// Builds the starting scene from an optional payload. A missing, empty or
/// malformed payload yields an empty scene; parse failures are logged, never
/// propagated.
pub fn load_scene(payload: Option<&str>) -> Scene {
    let Some(raw) = payload else {
        return Scene::new();
    };
    if raw.trim().is_empty() {
        return Scene::new();
    }
    match decode_scene(raw) {
        Ok(elements) => Scene::from_elements(elements),
        Err(err) => {
            log::warn!("ignoring canvas payload: {}", err);
            Scene::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{Shape, StickyPriority};

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene
            .insert(Element::new(
                [1.0, 0.0, 0.0, 1.0],
                2.0,
                Shape::Rectangle {
                    x: 10.0,
                    y: 20.0,
                    width: 30.0,
                    height: 40.0,
                },
            ))
            .unwrap();
        scene
            .insert(Element::new(
                [0.0, 0.0, 0.0, 1.0],
                3.0,
                Shape::Path {
                    points: vec![[0.0, 0.0], [5.0, 5.0], [10.0, 0.0]],
                },
            ))
            .unwrap();
        scene
            .insert(Element::new(
                [0.0, 0.0, 1.0, 1.0],
                2.0,
                Shape::StickyNote {
                    x: 100.0,
                    y: 100.0,
                    width: 200.0,
                    height: 180.0,
                    text: "note".to_string(),
                    priority: StickyPriority::Urgent,
                    created_at: "1700000000000".to_string(),
                },
            ))
            .unwrap();
        scene
    }

    #[test]
    fn encode_decode_round_trips_in_order() {
        let scene = sample_scene();
        let payload = encode_scene(&scene).unwrap();
        let elements = decode_scene(&payload).unwrap();
        assert_eq!(elements, scene.elements());
    }

    #[test]
    fn payload_uses_the_host_field_names() {
        let mut scene = Scene::new();
        scene
            .insert(Element::new(
                [0.0, 0.0, 0.0, 1.0],
                2.0,
                Shape::Text {
                    x: 1.0,
                    y: 2.0,
                    text: "hello".to_string(),
                    font_size: 32.0,
                },
            ))
            .unwrap();

        let payload = encode_scene(&scene).unwrap();
        assert!(payload.contains("\"canvasElements\""));
        assert!(payload.contains("\"kind\":\"text\""));
        assert!(payload.contains("\"strokeWidth\""));
        assert!(payload.contains("\"fontSize\""));
    }

    #[test]
    fn sticky_notes_tag_as_sticky_note() {
        let payload = encode_scene(&sample_scene()).unwrap();
        assert!(payload.contains("\"kind\":\"stickyNote\""));
        assert!(payload.contains("\"priority\":\"urgent\""));
        assert!(payload.contains("\"createdAt\""));
    }

    #[test]
    fn load_tolerates_missing_and_malformed_payloads() {
        assert!(load_scene(None).is_empty());
        assert!(load_scene(Some("")).is_empty());
        assert!(load_scene(Some("not json")).is_empty());
        assert!(load_scene(Some("{\"wrongField\":[]}")).is_empty());
    }

    #[test]
    fn load_skips_duplicate_ids() {
        let scene = sample_scene();
        let mut elements = scene.snapshot();
        elements.push(elements[0].clone());
        let payload = serde_json::to_string(&ScenePayloadRef {
            canvas_elements: &elements,
        })
        .unwrap();

        let loaded = load_scene(Some(&payload));
        assert_eq!(loaded.len(), scene.len());
    }

    #[test]
    fn opacity_defaults_when_absent_from_the_payload() {
        let payload = r#"{"canvasElements":[{
            "id":"8c1ad1f1-13a2-4e21-a88a-2bb379fcb628",
            "color":[0.0,0.0,0.0,1.0],
            "strokeWidth":2.0,
            "kind":"circle","x":5.0,"y":5.0,"radius":9.0
        }]}"#;
        let elements = decode_scene(payload).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].opacity, 1.0);
    }
}
