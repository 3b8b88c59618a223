use super::geometry::{AuxButton, Point, Region, WedgeRegion};
use super::model::PieMenu;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillShade {
    Base,
    Alternate,
    Hovered,
}

impl FillShade {
    /// Hover wins over alternation; alternation shades odd wedges only.
    pub fn resolve(hovered: bool, alternate_colors: bool, index: usize) -> Self {
        if hovered {
            Self::Hovered
        } else if alternate_colors && index % 2 == 1 {
            Self::Alternate
        } else {
            Self::Base
        }
    }

    pub fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Base => colors.base,
            Self::Alternate => colors.alternate,
            Self::Hovered => colors.hovered,
        }
    }
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct Painter<'a> {
    cr: &'a Context,
    colors: &'a ThemeColors,
    stroke_width: f64,
}

impl Painter<'_> {
    fn wedge_path(&self, wedge: &WedgeRegion) {
        let c = wedge.center;
        self.cr.new_path();
        self.cr.move_to(c.x, c.y);
        self.cr.arc_negative(
            c.x,
            c.y,
            wedge.radius,
            wedge.start_angle.to_radians(),
            wedge.end_angle().to_radians(),
        );
        self.cr.close_path();
    }

    fn outline(&self) -> Result<(), cairo::Error> {
        if self.stroke_width <= 0.0 {
            self.cr.new_path();
            return Ok(());
        }
        set_color(self.cr, self.colors.outline);
        self.cr.set_line_width(self.stroke_width);
        self.cr.stroke()
    }

    fn fill_wedge(&self, wedge: &WedgeRegion, shade: FillShade) -> Result<(), cairo::Error> {
        self.wedge_path(wedge);
        set_color(self.cr, shade.color(self.colors));
        self.cr.fill()
    }

    fn outline_wedge(&self, wedge: &WedgeRegion) -> Result<(), cairo::Error> {
        self.wedge_path(wedge);
        self.outline()
    }

    fn aux_button(
        &self,
        button: &AuxButton,
        hovered: bool,
        icon: Option<&Pixbuf>,
        icon_size: u32,
    ) -> Result<(), cairo::Error> {
        let shade = if hovered {
            FillShade::Hovered
        } else {
            FillShade::Base
        };

        self.cr.new_path();
        self.cr
            .arc(button.center.x, button.center.y, button.radius, 0.0, 2.0 * PI);
        set_color(self.cr, shade.color(self.colors));
        self.cr.fill_preserve()?;
        self.outline()?;

        match icon {
            Some(pixbuf) => self.icon(pixbuf, button.center, icon_size),
            None => Ok(()),
        }
    }

    /// Scales `pixbuf` to `size` and centres it on `center`.
    fn icon(&self, pixbuf: &Pixbuf, center: Point, size: u32) -> Result<(), cairo::Error> {
        let longest = pixbuf.width().max(pixbuf.height());
        if size == 0 || longest <= 0 {
            return Ok(());
        }
        let size = size as f64;
        let scale = size / longest as f64;

        self.cr.save()?;
        self.cr.translate(center.x - size / 2.0, center.y - size / 2.0);
        self.cr.scale(scale, scale);
        self.cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        self.cr.paint()?;
        self.cr.restore()
    }
}

/// Paints `menu` at its origin with `hover` highlighted. A hidden menu paints
/// nothing.
pub fn draw(
    cr: &Context,
    menu: &PieMenu,
    hover: Region,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if !menu.is_visible() {
        return Ok(());
    }

    let config = menu.config();
    let geometry = menu.geometry();
    let painter = Painter {
        cr,
        colors,
        stroke_width: config.stroke_width,
    };

    cr.save()?;
    cr.translate(menu.origin().x, menu.origin().y);

    for wedge in &geometry.wedges {
        let shade = FillShade::resolve(
            hover == Region::Wedge(wedge.index),
            config.alternate_colors,
            wedge.index,
        );
        painter.fill_wedge(wedge, shade)?;
    }

    for (wedge, slot) in geometry.wedges.iter().zip(menu.slots()) {
        painter.outline_wedge(wedge)?;
        if let Some(pixbuf) = slot.current_icon() {
            painter.icon(pixbuf, geometry.icon_center(wedge), config.pie_icon_size)?;
        }
    }

    painter.aux_button(
        &geometry.close,
        hover == Region::Close,
        menu.close_icon(),
        config.close_icon_size,
    )?;

    if config.show_pin_button {
        painter.aux_button(
            &geometry.pin,
            hover == Region::Pin,
            menu.pin_icon(),
            config.pin_icon_size,
        )?;
    }

    cr.restore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuConfiguration;
    use cairo::{Format, ImageSurface};

    const SIZE: i32 = 300;
    const ANCHOR: Point = Point { x: 150.0, y: 150.0 };

    fn shown(config: MenuConfiguration) -> PieMenu {
        let mut menu = PieMenu::new(config).unwrap();
        menu.show(ANCHOR);
        menu
    }

    /// Host point inside `wedge`, clear of outlines and the close button.
    fn inside(menu: &PieMenu, wedge: usize) -> Point {
        let geometry = menu.geometry();
        let local = geometry
            .center
            .polar(60.0, geometry.wedges[wedge].bisector());
        Point::new(local.x + menu.origin().x, local.y + menu.origin().y)
    }

    /// Renders `menu` with the hover taken from `pointer` and returns the
    /// (r, g, b, a) bytes at each sample point.
    fn render(menu: &PieMenu, pointer: Option<Point>, samples: &[Point]) -> Vec<(u8, u8, u8, u8)> {
        let mut surface = ImageSurface::create(Format::ARgb32, SIZE, SIZE).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            let hover = pointer.map_or(Region::Outside, |p| menu.region_at(p));
            draw(&cr, menu, hover, &ThemeColors::default()).unwrap();
        }
        surface.flush();

        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        samples
            .iter()
            .map(|p| {
                let offset = p.y as usize * stride + p.x as usize * 4;
                let px = u32::from_ne_bytes([
                    data[offset],
                    data[offset + 1],
                    data[offset + 2],
                    data[offset + 3],
                ]);
                (
                    (px >> 16) as u8,
                    (px >> 8) as u8,
                    px as u8,
                    (px >> 24) as u8,
                )
            })
            .collect()
    }

    fn assert_grey(pixel: (u8, u8, u8, u8), level: u8) {
        let (r, g, b, a) = pixel;
        assert_eq!(a, 255, "pixel {pixel:?}");
        for channel in [r, g, b] {
            assert!(channel.abs_diff(level) <= 1, "pixel {pixel:?}, expected {level}");
        }
    }

    #[test]
    fn test_shade_resolution() {
        let cases = vec![
            ((false, false, 0), FillShade::Base),
            ((false, false, 1), FillShade::Base),
            ((false, true, 0), FillShade::Base),
            ((false, true, 1), FillShade::Alternate),
            ((true, true, 1), FillShade::Hovered),
            ((true, false, 2), FillShade::Hovered),
        ];

        for ((hovered, alternate, index), expected) in cases {
            assert_eq!(FillShade::resolve(hovered, alternate, index), expected);
        }
    }

    #[test]
    fn test_hovered_wedge_is_highlighted() {
        let menu = shown(MenuConfiguration::default());
        let samples = [inside(&menu, 0), inside(&menu, 2), ANCHOR];

        let pixels = render(&menu, Some(inside(&menu, 2)), &samples);
        assert_grey(pixels[0], 220);
        assert_grey(pixels[1], 250);
        assert_grey(pixels[2], 220);
    }

    #[test]
    fn test_alternate_colors_and_close_hover() {
        let menu = shown(MenuConfiguration {
            alternate_colors: true,
            ..MenuConfiguration::default()
        });
        let samples = [inside(&menu, 0), inside(&menu, 1), inside(&menu, 3), ANCHOR];

        let pixels = render(&menu, Some(ANCHOR), &samples);
        assert_grey(pixels[0], 220);
        assert_grey(pixels[1], 242);
        assert_grey(pixels[2], 242);
        assert_grey(pixels[3], 250);
    }

    #[test]
    fn test_hidden_menu_paints_nothing() {
        let menu = PieMenu::new(MenuConfiguration::default()).unwrap();
        let pixels = render(&menu, None, &[ANCHOR]);
        assert_eq!(pixels[0].3, 0);
    }
}
