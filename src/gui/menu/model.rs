use crate::config::MenuConfiguration;
use crate::events::{MouseButton, PieEvent};
use crate::gui::menu::{Geometry, MenuError, Point, Region};
use crate::icon::{self, IconName};
use gdk_pixbuf::Pixbuf;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone)]
pub struct ButtonSlot {
    pub enabled: bool,
    pub icon: Option<Pixbuf>,
    pub disabled_icon: Option<Pixbuf>,
}

impl Default for ButtonSlot {
    fn default() -> Self {
        Self {
            enabled: true,
            icon: None,
            disabled_icon: None,
        }
    }
}

impl ButtonSlot {
    fn set_icon(&mut self, pixbuf: Option<Pixbuf>) {
        self.disabled_icon = pixbuf.as_ref().and_then(icon::disabled_variant);
        self.icon = pixbuf;
    }

    /// Icon matching the enabled state.
    pub fn current_icon(&self) -> Option<&Pixbuf> {
        if self.enabled {
            self.icon.as_ref()
        } else {
            self.disabled_icon.as_ref()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum MenuState {
    Hidden,
    VisibleUnpinned,
    VisiblePinned,
}

/// The pie menu widget state: configuration, derived geometry, per-button
/// slots and the show/hide/pin state machine.
///
/// Pointer positions passed in are in host coordinates; the menu converts them
/// using the origin set by [`PieMenu::show`].
#[derive(Debug, Clone)]
pub struct PieMenu {
    config: MenuConfiguration,
    geometry: Geometry,
    slots: Vec<ButtonSlot>,
    close_icon: Option<Pixbuf>,
    pin_icon: Option<Pixbuf>,
    origin: Point,
    visible: bool,
    pinned: bool,
}

impl PieMenu {
    pub fn new(config: MenuConfiguration) -> Result<Self, MenuError> {
        let mut config = config;
        config.base_angle = config.base_angle.rem_euclid(360.0);
        let geometry = Geometry::new(&config)?;

        Ok(Self {
            slots: vec![ButtonSlot::default(); config.button_count],
            config,
            geometry,
            close_icon: None,
            pin_icon: None,
            origin: Point::default(),
            visible: false,
            pinned: false,
        })
    }

    pub fn config(&self) -> &MenuConfiguration {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn slots(&self) -> &[ButtonSlot] {
        &self.slots
    }

    pub fn close_icon(&self) -> Option<&Pixbuf> {
        self.close_icon.as_ref()
    }

    pub fn pin_icon(&self) -> Option<&Pixbuf> {
        self.pin_icon.as_ref()
    }

    /// Top-left corner of the menu in host coordinates.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn state(&self) -> MenuState {
        match (self.visible, self.pinned) {
            (false, _) => MenuState::Hidden,
            (true, false) => MenuState::VisibleUnpinned,
            (true, true) => MenuState::VisiblePinned,
        }
    }

    /// Applies `update` to a copy of the configuration and commits it only if
    /// the resulting geometry is valid.
    fn reconfigure(
        &mut self,
        update: impl FnOnce(&mut MenuConfiguration),
    ) -> Result<(), MenuError> {
        let mut config = self.config.clone();
        update(&mut config);
        self.geometry = Geometry::new(&config)?;
        self.config = config;
        Ok(())
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut ButtonSlot, MenuError> {
        let count = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(MenuError::OutOfRange { index, count })
    }

    pub fn set_button_count(&mut self, count: usize) -> Result<(), MenuError> {
        self.reconfigure(|c| c.button_count = count)?;
        self.slots.resize_with(count, ButtonSlot::default);
        Ok(())
    }

    pub fn set_base_angle(&mut self, angle: f64) -> Result<(), MenuError> {
        self.reconfigure(|c| c.base_angle = angle.rem_euclid(360.0))
    }

    pub fn set_stroke_width(&mut self, width: f64) -> Result<(), MenuError> {
        self.reconfigure(|c| c.stroke_width = width)
    }

    pub fn set_pie_radius(&mut self, radius: f64) -> Result<(), MenuError> {
        self.reconfigure(|c| c.pie_radius = radius)
    }

    pub fn set_close_button_radius(&mut self, radius: f64) -> Result<(), MenuError> {
        self.reconfigure(|c| c.close_button_radius = radius)
    }

    pub fn set_pin_button_radius(&mut self, radius: f64) -> Result<(), MenuError> {
        self.reconfigure(|c| c.pin_button_radius = radius)
    }

    pub fn set_pie_button_icon_size(&mut self, size: u32) -> Result<(), MenuError> {
        self.reconfigure(|c| c.pie_icon_size = size)
    }

    pub fn set_close_button_icon_size(&mut self, size: u32) {
        self.config.close_icon_size = size;
    }

    pub fn set_pin_button_icon_size(&mut self, size: u32) {
        self.config.pin_icon_size = size;
    }

    pub fn set_alternate_colors(&mut self, value: bool) {
        self.config.alternate_colors = value;
    }

    pub fn set_show_pin_button(&mut self, value: bool) {
        self.config.show_pin_button = value;
    }

    pub fn set_close_button_as_regular_button(&mut self, value: bool) {
        self.config.close_button_as_regular_button = value;
    }

    pub fn set_button_enabled(&mut self, index: usize, enabled: bool) -> Result<(), MenuError> {
        self.slot_mut(index)?.enabled = enabled;
        Ok(())
    }

    pub fn set_button_pixbuf(&mut self, index: usize, pixbuf: Pixbuf) -> Result<(), MenuError> {
        self.slot_mut(index)?.set_icon(Some(pixbuf));
        Ok(())
    }

    /// Loads the icon for button `index` and derives its disabled variant.
    ///
    /// An icon that cannot be loaded leaves the slot without an icon and is
    /// reported as [`MenuError::MissingResource`].
    pub fn set_button_icon(&mut self, index: usize, name: &IconName) -> Result<(), MenuError> {
        let slot = self.slot_mut(index)?;
        match icon::load_pixbuf(name) {
            Ok(pixbuf) => {
                slot.set_icon(Some(pixbuf));
                Ok(())
            }
            Err(e) => {
                log::warn!("Button {} icon unavailable: {}", index, e);
                slot.set_icon(None);
                Err(e)
            }
        }
    }

    /// Sets both icon variants explicitly instead of deriving the disabled one.
    /// The slot is only updated once both icons have loaded.
    pub fn set_button_icons(
        &mut self,
        index: usize,
        normal: &IconName,
        disabled: &IconName,
    ) -> Result<(), MenuError> {
        self.slot_mut(index)?;
        let normal = icon::load_pixbuf(normal)?;
        let disabled = icon::load_pixbuf(disabled)?;

        let slot = self.slot_mut(index)?;
        slot.icon = Some(normal);
        slot.disabled_icon = Some(disabled);
        Ok(())
    }

    pub fn set_close_button_icon(&mut self, name: &IconName) -> Result<(), MenuError> {
        let loaded = icon::load_pixbuf(name);
        self.close_icon = loaded.as_ref().ok().cloned();
        loaded.map(|_| ())
    }

    pub fn set_pin_button_icon(&mut self, name: &IconName) -> Result<(), MenuError> {
        let loaded = icon::load_pixbuf(name);
        self.pin_icon = loaded.as_ref().ok().cloned();
        loaded.map(|_| ())
    }

    /// Centres the menu on `anchor` and makes it visible. Showing an already
    /// visible menu only moves it.
    pub fn show(&mut self, anchor: Point) {
        let half = self.geometry.size / 2.0;
        self.origin = Point::new(anchor.x - half, anchor.y - half);
        self.visible = true;
        log::info!("Menu shown at ({:.0}, {:.0})", anchor.x, anchor.y);
    }

    pub fn hide_if_not_pinned(&mut self) {
        if !self.pinned {
            self.hide();
        }
    }

    fn hide(&mut self) {
        if self.visible {
            log::info!("Menu hidden");
        }
        self.visible = false;
    }

    fn to_local(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.origin.x, pointer.y - self.origin.y)
    }

    /// Whether `pointer` falls within the menu's square while it is shown.
    pub fn contains(&self, pointer: Point) -> bool {
        self.visible && self.geometry.contains(self.to_local(pointer))
    }

    /// Region under `pointer`, recomputed on every call.
    pub fn region_at(&self, pointer: Point) -> Region {
        if !self.visible {
            return Region::Outside;
        }
        self.geometry
            .classify(self.to_local(pointer), self.config.show_pin_button)
    }

    /// Pointer motion never changes state; returns whether a redraw is needed.
    pub fn on_pointer_move(&self, _pointer: Point) -> bool {
        self.visible
    }

    pub fn on_pointer_release(&mut self, pointer: Point, button: MouseButton) -> Option<PieEvent> {
        if !self.visible || button != MouseButton::Primary {
            return None;
        }

        let region = self.region_at(pointer);
        log::debug!("Release over {}", region);

        match region {
            Region::Pin => {
                self.pinned = !self.pinned;
                log::info!("Menu {}", if self.pinned { "pinned" } else { "unpinned" });
                None
            }
            Region::Close => {
                self.hide();
                self.config
                    .close_button_as_regular_button
                    .then_some(PieEvent::CloseClicked)
            }
            Region::Wedge(i) if self.slots.get(i).is_some_and(|s| s.enabled) => {
                self.hide_if_not_pinned();
                Some(PieEvent::ButtonClicked(i))
            }
            Region::Wedge(_) | Region::Outside => None,
        }
    }
}
