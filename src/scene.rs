//! Ordered element store. Index order is paint order: later elements sit on
//! top of earlier ones, and picking walks the list back to front.

use thiserror::Error;

use crate::drawing::{Element, ElementId, ElementPatch};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("element {0} already exists in the scene")]
    DuplicateId(ElementId),
    #[error("element {0} is not in the scene")]
    NotFound(ElementId),
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: Vec<Element>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a scene from loaded elements, skipping any whose id collides
    /// with an earlier one. Later duplicates lose.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut scene = Scene::new();
        for element in elements {
            if let Err(err) = scene.insert(element) {
                log::warn!("dropping element while loading: {}", err);
            }
        }
        scene
    }

    pub fn insert(&mut self, element: Element) -> Result<(), SceneError> {
        if self.contains(element.id) {
            return Err(SceneError::DuplicateId(element.id));
        }
        self.elements.push(element);
        Ok(())
    }

    pub fn update(&mut self, id: ElementId, patch: ElementPatch) -> Result<(), SceneError> {
        match self.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                patch.apply(element);
                Ok(())
            }
            None => Err(SceneError::NotFound(id)),
        }
    }

    pub fn remove(&mut self, id: ElementId) -> Result<Element, SceneError> {
        match self.elements.iter().position(|e| e.id == id) {
            Some(index) => Ok(self.elements.remove(index)),
            None => Err(SceneError::NotFound(id)),
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.iter().any(|e| e.id == id)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Full copy of the current elements, in paint order.
    pub fn snapshot(&self) -> Vec<Element> {
        self.elements.clone()
    }

    /// Replaces the scene contents with a previously taken snapshot.
    pub fn restore(&mut self, snapshot: &[Element]) {
        self.elements = snapshot.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::Shape;

    fn circle(x: f32, y: f32, radius: f32) -> Element {
        Element::new(
            [0.0, 0.0, 0.0, 1.0],
            2.0,
            Shape::Circle { x, y, radius },
        )
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut scene = Scene::new();
        let element = circle(0.0, 0.0, 5.0);
        let id = element.id;
        scene.insert(element.clone()).unwrap();
        assert_eq!(scene.insert(element), Err(SceneError::DuplicateId(id)));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn update_patches_in_place_and_keeps_order() {
        let mut scene = Scene::new();
        let a = circle(0.0, 0.0, 5.0);
        let b = circle(10.0, 10.0, 5.0);
        let (id_a, id_b) = (a.id, b.id);
        scene.insert(a).unwrap();
        scene.insert(b).unwrap();

        scene
            .update(
                id_a,
                ElementPatch::shape(Shape::Circle {
                    x: 1.0,
                    y: 1.0,
                    radius: 5.0,
                }),
            )
            .unwrap();

        assert_eq!(scene.elements()[0].id, id_a);
        assert_eq!(scene.elements()[1].id, id_b);
        match &scene.get(id_a).unwrap().shape {
            Shape::Circle { x, y, .. } => assert_eq!((*x, *y), (1.0, 1.0)),
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn update_missing_element_fails() {
        let mut scene = Scene::new();
        let ghost = ElementId::fresh();
        assert_eq!(
            scene.update(ghost, ElementPatch::default()),
            Err(SceneError::NotFound(ghost))
        );
    }

    #[test]
    fn remove_returns_the_element() {
        let mut scene = Scene::new();
        let element = circle(0.0, 0.0, 5.0);
        let id = element.id;
        scene.insert(element).unwrap();

        let removed = scene.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(scene.is_empty());
        assert_eq!(scene.remove(id), Err(SceneError::NotFound(id)));
    }

    #[test]
    fn from_elements_skips_colliding_ids() {
        let element = circle(0.0, 0.0, 5.0);
        let twin = element.clone();
        let scene = Scene::from_elements(vec![element, twin]);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut scene = Scene::new();
        scene.insert(circle(0.0, 0.0, 5.0)).unwrap();
        let saved = scene.snapshot();

        scene.insert(circle(10.0, 10.0, 5.0)).unwrap();
        assert_eq!(scene.len(), 2);

        scene.restore(&saved);
        assert_eq!(scene.len(), 1);
    }
}
