use crate::{
    error::{ScrollyError, ScrollyResult},
    model::{Dataset, Summaries},
    surface::Surface,
};

/// The contract every scene satisfies: given the surface, the dataset, and
/// the precomputed summaries, redraw everything deterministically.
///
/// Implementations hold no mutable state; anything drawn is reconstructed
/// from the three inputs on every call, so identical inputs produce an
/// identical call sequence on the surface. Scenes never clear — the
/// navigator owns that part of the render cycle.
pub trait Scene {
    fn render(
        &self,
        surface: &mut dyn Surface,
        dataset: &Dataset,
        summaries: &Summaries,
    ) -> ScrollyResult<()>;
}

/// A scene paired with its narrative caption.
pub struct SceneDescriptor {
    pub caption: String,
    pub scene: Box<dyn Scene>,
}

/// Fixed ordered sequence of scene descriptors; built once at startup,
/// read-only thereafter.
pub struct SceneRegistry {
    scenes: Vec<SceneDescriptor>,
}

impl SceneRegistry {
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn get(&self, index: usize) -> ScrollyResult<&SceneDescriptor> {
        self.scenes.get(index).ok_or(ScrollyError::IndexOutOfRange {
            index,
            len: self.scenes.len(),
        })
    }
}

pub struct RegistryBuilder {
    scenes: Vec<SceneDescriptor>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self { scenes: Vec::new() }
    }

    pub fn scene(mut self, caption: impl Into<String>, scene: impl Scene + 'static) -> Self {
        self.scenes.push(SceneDescriptor {
            caption: caption.into(),
            scene: Box::new(scene),
        });
        self
    }

    pub fn build(self) -> ScrollyResult<SceneRegistry> {
        if self.scenes.is_empty() {
            return Err(ScrollyError::validation(
                "a scene registry must contain at least one scene",
            ));
        }
        Ok(SceneRegistry {
            scenes: self.scenes,
        })
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Scene for Noop {
        fn render(
            &self,
            _surface: &mut dyn Surface,
            _dataset: &Dataset,
            _summaries: &Summaries,
        ) -> ScrollyResult<()> {
            Ok(())
        }
    }

    #[test]
    fn builder_rejects_empty_registry() {
        assert!(matches!(
            RegistryBuilder::new().build(),
            Err(ScrollyError::Validation(_))
        ));
    }

    #[test]
    fn get_checks_bounds() {
        let registry = RegistryBuilder::new()
            .scene("first", Noop)
            .scene("second", Noop)
            .build()
            .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).unwrap().caption, "second");
        assert!(matches!(
            registry.get(2),
            Err(ScrollyError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }
}
