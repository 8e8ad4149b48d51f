//! Clickable buttons for menu scenes.

use crate::geometry::{is_point_in_rect, Rect, Vector2};
use crate::scene::SceneRequests;

/// Called when a button is pressed; may request a scene change or quit.
pub type OnClick = Box<dyn Fn(&mut SceneRequests)>;

/// Identifier handed out by [`ButtonPanel::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ButtonId(usize);

pub struct Button {
    pub rect: Rect,
    pub label: String,
    /// Disabled buttons are neither drawn nor pressable.
    pub enabled: bool,
    on_click: OnClick,
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("rect", &self.rect)
            .field("label", &self.label)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// The buttons owned by one scene.
#[derive(Debug, Default)]
pub struct ButtonPanel {
    buttons: Vec<Button>,
}

impl ButtonPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a disabled button.
    pub fn add(
        &mut self,
        rect: Rect,
        label: impl Into<String>,
        on_click: impl Fn(&mut SceneRequests) + 'static,
    ) -> ButtonId {
        self.buttons.push(Button {
            rect,
            label: label.into(),
            enabled: false,
            on_click: Box::new(on_click),
        });
        ButtonId(self.buttons.len() - 1)
    }

    pub fn get(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.get(id.0)
    }

    /// Unknown ids are ignored.
    pub fn enable(&mut self, id: ButtonId) {
        if let Some(b) = self.buttons.get_mut(id.0) {
            b.enabled = true;
        }
    }

    pub fn disable(&mut self, id: ButtonId) {
        if let Some(b) = self.buttons.get_mut(id.0) {
            b.enabled = false;
        }
    }

    /// Fire the first enabled button under `point`. Returns whether one fired.
    pub fn press(&self, point: Vector2, requests: &mut SceneRequests) -> bool {
        let Some(button) = self
            .buttons
            .iter()
            .find(|b| b.enabled && is_point_in_rect(point, b.rect))
        else {
            return false;
        };
        log::debug!("button `{}` pressed", button.label);
        (button.on_click)(requests);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Button> + '_ {
        self.buttons.iter()
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn clear(&mut self) {
        self.buttons.clear();
    }
}
