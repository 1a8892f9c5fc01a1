use crate::{
    error::{ScrollyError, ScrollyResult},
    model::{Dataset, Summaries},
    scene::SceneRegistry,
    surface::Surface,
};

/// Label for the forward control: "Return to Start" on the last scene,
/// "Next" everywhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextLabel {
    Next,
    ReturnToStart,
}

impl NextLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            NextLabel::Next => "Next",
            NextLabel::ReturnToStart => "Return to Start",
        }
    }
}

/// What the UI adapter shows for the navigation controls after a render
/// cycle. The previous control is hidden on the first scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlState {
    pub prev_visible: bool,
    pub next_label: NextLabel,
}

/// Caption and control-state sinks, implemented by the external UI adapter.
pub trait Chrome {
    fn set_caption(&mut self, caption: &str);
    fn set_controls(&mut self, state: ControlState);
}

/// The scene state machine. Owns the only mutable piece of session state,
/// the current scene index, and couples every transition to exactly one
/// render cycle: clear, draw the scene at the new index, update caption and
/// controls.
///
/// Single-threaded by construction: transitions take `&mut self` and run to
/// completion, so renders never overlap.
pub struct Navigator {
    registry: SceneRegistry,
    dataset: Dataset,
    summaries: Summaries,
    current: usize,
}

impl Navigator {
    /// Starts at scene 0. The registry builder guarantees at least one
    /// scene; the check here keeps the invariant local.
    pub fn new(
        registry: SceneRegistry,
        dataset: Dataset,
        summaries: Summaries,
    ) -> ScrollyResult<Self> {
        if registry.is_empty() {
            return Err(ScrollyError::validation(
                "navigator requires at least one scene",
            ));
        }
        Ok(Self {
            registry,
            dataset,
            summaries,
            current: 0,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn scene_count(&self) -> usize {
        self.registry.len()
    }

    pub fn controls(&self) -> ControlState {
        ControlState {
            prev_visible: self.current != 0,
            next_label: if self.current == self.registry.len() - 1 {
                NextLabel::ReturnToStart
            } else {
                NextLabel::Next
            },
        }
    }

    /// The initial render: the one draw that is not preceded by a
    /// transition. Call once at startup, after the dataset is fully loaded.
    #[tracing::instrument(skip_all)]
    pub fn render_current(
        &self,
        surface: &mut dyn Surface,
        chrome: &mut dyn Chrome,
    ) -> ScrollyResult<()> {
        self.render_cycle(surface, chrome)
    }

    /// Advance one scene; the last scene wraps back to the start.
    #[tracing::instrument(skip(self, surface, chrome))]
    pub fn next(
        &mut self,
        surface: &mut dyn Surface,
        chrome: &mut dyn Chrome,
    ) -> ScrollyResult<()> {
        self.current = if self.current == self.registry.len() - 1 {
            0
        } else {
            self.current + 1
        };
        self.render_cycle(surface, chrome)
    }

    /// Step back one scene; the first scene stays put. The asymmetry with
    /// [`Navigator::next`] is deliberate: back navigation stops at the
    /// start, forward navigation loops.
    #[tracing::instrument(skip(self, surface, chrome))]
    pub fn previous(
        &mut self,
        surface: &mut dyn Surface,
        chrome: &mut dyn Chrome,
    ) -> ScrollyResult<()> {
        self.current = self.current.saturating_sub(1);
        self.render_cycle(surface, chrome)
    }

    /// Jump straight to scene `index`. Bounds are checked before any
    /// surface mutation, so a failed jump leaves the surface untouched.
    #[tracing::instrument(skip(self, surface, chrome))]
    pub fn jump_to(
        &mut self,
        index: usize,
        surface: &mut dyn Surface,
        chrome: &mut dyn Chrome,
    ) -> ScrollyResult<()> {
        if index >= self.registry.len() {
            return Err(ScrollyError::IndexOutOfRange {
                index,
                len: self.registry.len(),
            });
        }
        self.current = index;
        self.render_cycle(surface, chrome)
    }

    // Descriptor lookup first (fallible, before any surface mutation), then
    // exactly one clear, one scene render, one caption update, one control
    // update.
    fn render_cycle(
        &self,
        surface: &mut dyn Surface,
        chrome: &mut dyn Chrome,
    ) -> ScrollyResult<()> {
        let descriptor = self.registry.get(self.current)?;
        tracing::debug!(scene = self.current, caption = %descriptor.caption, "render cycle");

        surface.clear();
        descriptor
            .scene
            .render(surface, &self.dataset, &self.summaries)?;
        chrome.set_caption(&descriptor.caption);
        chrome.set_controls(self.controls());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::Row,
        scene::{RegistryBuilder, Scene},
        surface::Recorder,
    };
    use chrono::NaiveDate;

    struct Blank;

    impl Scene for Blank {
        fn render(
            &self,
            _surface: &mut dyn Surface,
            _dataset: &Dataset,
            _summaries: &Summaries,
        ) -> ScrollyResult<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct TestChrome {
        caption: String,
        controls: Option<ControlState>,
    }

    impl Chrome for TestChrome {
        fn set_caption(&mut self, caption: &str) {
            self.caption = caption.to_string();
        }

        fn set_controls(&mut self, state: ControlState) {
            self.controls = Some(state);
        }
    }

    fn navigator(scene_count: usize) -> Navigator {
        let mut builder = RegistryBuilder::new();
        for i in 0..scene_count {
            builder = builder.scene(format!("scene {i}"), Blank);
        }
        let registry = builder.build().unwrap();
        let dataset = Dataset::from_rows(vec![Row {
            date: NaiveDate::from_ymd_opt(2020, 1, 21).unwrap(),
            region: "WA".to_string(),
            cases: 1,
            deaths: 0,
        }])
        .unwrap();
        let summaries = Summaries::compute(&dataset).unwrap();
        Navigator::new(registry, dataset, summaries).unwrap()
    }

    #[test]
    fn previous_saturates_at_zero() {
        let mut nav = navigator(3);
        let mut surface = Recorder::new(800.0, 600.0);
        let mut chrome = TestChrome::default();

        nav.previous(&mut surface, &mut chrome).unwrap();
        assert_eq!(nav.current_index(), 0);
        // Still a transition: exactly one render cycle happened.
        assert_eq!(surface.clear_count(), 1);
    }

    #[test]
    fn next_wraps_from_last_to_start() {
        let mut nav = navigator(3);
        let mut surface = Recorder::new(800.0, 600.0);
        let mut chrome = TestChrome::default();

        nav.jump_to(2, &mut surface, &mut chrome).unwrap();
        nav.next(&mut surface, &mut chrome).unwrap();
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn five_nexts_come_full_circle() {
        let mut nav = navigator(5);
        let mut surface = Recorder::new(800.0, 600.0);
        let mut chrome = TestChrome::default();

        for _ in 0..5 {
            nav.next(&mut surface, &mut chrome).unwrap();
        }
        assert_eq!(nav.current_index(), 0);
        assert_eq!(surface.clear_count(), 5);
    }

    #[test]
    fn controls_reflect_position() {
        let mut nav = navigator(3);
        let mut surface = Recorder::new(800.0, 600.0);
        let mut chrome = TestChrome::default();

        nav.render_current(&mut surface, &mut chrome).unwrap();
        assert_eq!(
            chrome.controls.unwrap(),
            ControlState {
                prev_visible: false,
                next_label: NextLabel::Next
            }
        );

        nav.jump_to(2, &mut surface, &mut chrome).unwrap();
        assert_eq!(
            chrome.controls.unwrap(),
            ControlState {
                prev_visible: true,
                next_label: NextLabel::ReturnToStart
            }
        );
        assert_eq!(chrome.caption, "scene 2");
    }

    #[test]
    fn failed_jump_leaves_surface_and_index_untouched() {
        let mut nav = navigator(3);
        let mut surface = Recorder::new(800.0, 600.0);
        let mut chrome = TestChrome::default();

        let err = nav.jump_to(7, &mut surface, &mut chrome).unwrap_err();
        assert!(matches!(err, ScrollyError::IndexOutOfRange { index: 7, len: 3 }));
        assert_eq!(nav.current_index(), 0);
        assert!(surface.ops().is_empty());
        assert!(chrome.controls.is_none());
    }

    #[test]
    fn next_label_strings() {
        assert_eq!(NextLabel::Next.as_str(), "Next");
        assert_eq!(NextLabel::ReturnToStart.as_str(), "Return to Start");
    }
}
