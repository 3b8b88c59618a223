use crate::config::IconConfig;
use crate::events::{MouseButton, PieEvent};
use crate::gui::menu::{self, MenuError, PieMenu, Point, Region};
use crate::gui::theme::{self, ThemeColors};
use crate::icon;
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub menu: Rc<RefCell<PieMenu>>,
    pub pointer: Rc<Cell<Option<Point>>>,
    pub button_icon: Option<Pixbuf>,
    pub status: String,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Release(u32, Point),
    CursorMove(Point),
    CursorLeave,
    ShowAtPointer,
    HideIfNotPinned,
    ButtonCount(usize),
    BaseAngle(f64),
    StrokeWidth(f64),
    CloseRadius(f64),
    PinRadius(f64),
    AlternateColors(bool),
    ShowPinButton(bool),
    DisableFirstButton(bool),
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (PieMenu, IconConfig, Option<PathBuf>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Pie Menu"),
            set_default_size: (960, 640),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => {
                            sender.input(AppMsg::HideIfNotPinned);
                            glib::Propagation::Stop
                        }
                        gtk::gdk::Key::Menu => {
                            sender.input(AppMsg::ShowAtPointer);
                            glib::Propagation::Stop
                        }
                        _ => glib::Propagation::Proceed,
                    }
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 6,
                    set_width_request: 260,
                    add_css_class: "pie-menu-controls",

                    gtk::Label {
                        set_label: "Button count",
                        set_xalign: 0.0,
                    },
                    gtk::Scale::with_range(gtk::Orientation::Horizontal, 1.0, 12.0, 1.0) {
                        set_value: config.button_count as f64,
                        set_digits: 0,
                        set_draw_value: true,
                        connect_value_changed[sender] => move |scale| {
                            sender.input(AppMsg::ButtonCount(scale.value() as usize));
                        },
                    },

                    gtk::Label {
                        set_label: "Base angle (°)",
                        set_xalign: 0.0,
                    },
                    gtk::Scale::with_range(gtk::Orientation::Horizontal, 0.0, 360.0, 1.0) {
                        set_value: config.base_angle,
                        set_digits: 0,
                        set_draw_value: true,
                        connect_value_changed[sender] => move |scale| {
                            sender.input(AppMsg::BaseAngle(scale.value()));
                        },
                    },

                    gtk::Label {
                        set_label: "Stroke width (px)",
                        set_xalign: 0.0,
                    },
                    gtk::Scale::with_range(gtk::Orientation::Horizontal, 0.0, 20.0, 1.0) {
                        set_value: config.stroke_width,
                        set_digits: 0,
                        set_draw_value: true,
                        connect_value_changed[sender] => move |scale| {
                            sender.input(AppMsg::StrokeWidth(scale.value()));
                        },
                    },

                    gtk::Label {
                        set_label: "Close button radius (px)",
                        set_xalign: 0.0,
                    },
                    gtk::Scale::with_range(gtk::Orientation::Horizontal, 0.0, 60.0, 1.0) {
                        set_value: config.close_button_radius,
                        set_digits: 0,
                        set_draw_value: true,
                        connect_value_changed[sender] => move |scale| {
                            sender.input(AppMsg::CloseRadius(scale.value()));
                        },
                    },

                    gtk::Label {
                        set_label: "Pin button radius (px)",
                        set_xalign: 0.0,
                    },
                    gtk::Scale::with_range(gtk::Orientation::Horizontal, 0.0, 40.0, 1.0) {
                        set_value: config.pin_button_radius,
                        set_digits: 0,
                        set_draw_value: true,
                        connect_value_changed[sender] => move |scale| {
                            sender.input(AppMsg::PinRadius(scale.value()));
                        },
                    },

                    gtk::CheckButton::with_label("Alternate colors") {
                        set_active: config.alternate_colors,
                        connect_toggled[sender] => move |button| {
                            sender.input(AppMsg::AlternateColors(button.is_active()));
                        },
                    },
                    gtk::CheckButton::with_label("Show pin button") {
                        set_active: config.show_pin_button,
                        connect_toggled[sender] => move |button| {
                            sender.input(AppMsg::ShowPinButton(button.is_active()));
                        },
                    },
                    gtk::CheckButton::with_label("Disable button #0") {
                        connect_toggled[sender] => move |button| {
                            sender.input(AppMsg::DisableFirstButton(button.is_active()));
                        },
                    },

                    gtk::Label {
                        #[watch]
                        set_label: &model.status,
                        set_xalign: 0.0,
                        set_vexpand: true,
                        set_valign: gtk::Align::End,
                    },
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "pie-menu-surface",

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::CursorMove(Point::new(x, y)));
                        },
                        connect_leave[sender] => move |_| {
                            sender.input(AppMsg::CursorLeave);
                        },
                    },

                    add_controller = gtk::GestureClick {
                        set_button: 0, // Listen to all buttons
                        connect_released[sender] => move |gesture, _, x, y| {
                            sender.input(AppMsg::Release(gesture.current_button(), Point::new(x, y)));
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (mut pie, icons, stylesheet) = init;

        theme::load_css(stylesheet.as_deref());

        let button_icon = icon::load_pixbuf(&icons.button)
            .inspect_err(|e| log::warn!("Button icon unavailable: {}", e))
            .ok();
        if let Err(e) = pie.set_close_button_icon(&icons.close) {
            log::warn!("Close icon unavailable: {}", e);
        }
        if let Err(e) = pie.set_pin_button_icon(&icons.pin) {
            log::warn!("Pin icon unavailable: {}", e);
        }

        let config = pie.config().clone();

        let mut model = AppModel {
            menu: Rc::new(RefCell::new(pie)),
            pointer: Rc::new(Cell::new(None)),
            button_icon,
            status: "Right-click to open the menu".to_string(),
            drawing_area: gtk::DrawingArea::default(),
        };
        model.apply_button_icons();

        let widgets = view_output!();
        model.drawing_area = widgets.drawing_area.clone();

        let (menu_draw, pointer_draw) = (model.menu.clone(), model.pointer.clone());
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                let menu = menu_draw.borrow();
                let hover = pointer_draw
                    .get()
                    .map_or(Region::Outside, |p| menu.region_at(p));
                if let Err(e) = menu::draw(cr, &menu, hover, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Release(button, point) => self.release(MouseButton::from(button), point),
            AppMsg::CursorMove(point) => {
                self.pointer.set(Some(point));
                if !self.menu.borrow().on_pointer_move(point) {
                    return;
                }
            }
            AppMsg::CursorLeave => self.pointer.set(None),
            AppMsg::ShowAtPointer => {
                let anchor = self.pointer.get().unwrap_or_else(|| {
                    Point::new(
                        self.drawing_area.width() as f64 / 2.0,
                        self.drawing_area.height() as f64 / 2.0,
                    )
                });
                self.menu.borrow_mut().show(anchor);
            }
            AppMsg::HideIfNotPinned => self.menu.borrow_mut().hide_if_not_pinned(),
            AppMsg::ButtonCount(count) => {
                let result = self.menu.borrow_mut().set_button_count(count);
                self.report(result);
                self.apply_button_icons();
            }
            AppMsg::BaseAngle(angle) => {
                let result = self.menu.borrow_mut().set_base_angle(angle);
                self.report(result);
            }
            AppMsg::StrokeWidth(width) => {
                let result = self.menu.borrow_mut().set_stroke_width(width);
                self.report(result);
            }
            AppMsg::CloseRadius(radius) => {
                let result = self.menu.borrow_mut().set_close_button_radius(radius);
                self.report(result);
            }
            AppMsg::PinRadius(radius) => {
                let result = self.menu.borrow_mut().set_pin_button_radius(radius);
                self.report(result);
            }
            AppMsg::AlternateColors(value) => self.menu.borrow_mut().set_alternate_colors(value),
            AppMsg::ShowPinButton(value) => self.menu.borrow_mut().set_show_pin_button(value),
            AppMsg::DisableFirstButton(disabled) => {
                let result = self.menu.borrow_mut().set_button_enabled(0, !disabled);
                self.report(result);
            }
        }
        self.drawing_area.queue_draw();
    }
}

impl AppModel {
    /// Releases inside the open menu go to the menu; a secondary release
    /// elsewhere opens it, any other release dismisses it.
    fn release(&mut self, button: MouseButton, point: Point) {
        let mut menu = self.menu.borrow_mut();

        if menu.contains(point) {
            match menu.on_pointer_release(point, button) {
                Some(PieEvent::ButtonClicked(index)) => {
                    log::info!("Button {} clicked", index);
                    self.status = format!("You clicked button #{index}");
                }
                Some(PieEvent::CloseClicked) => {
                    self.status = "You clicked the close button".to_string();
                }
                None => {}
            }
        } else if button == MouseButton::Secondary {
            menu.show(point);
        } else {
            menu.hide_if_not_pinned();
        }
    }

    fn apply_button_icons(&self) {
        let Some(pixbuf) = &self.button_icon else {
            return;
        };
        let mut menu = self.menu.borrow_mut();
        for index in 0..menu.config().button_count {
            if let Err(e) = menu.set_button_pixbuf(index, pixbuf.clone()) {
                log::warn!("Failed to set icon for button {}: {}", index, e);
            }
        }
    }

    fn report(&mut self, result: Result<(), MenuError>) {
        if let Err(e) = result {
            log::warn!("Menu setting rejected: {}", e);
            self.status = e.to_string();
        }
    }
}
