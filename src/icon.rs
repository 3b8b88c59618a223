use crate::gui::menu::{DISABLED_ICON_OPACITY, MenuError};
use derive_more::{AsRef, Deref, Display, From, Into};
use freedesktop_icons::lookup;
use gdk_pixbuf::{Colorspace, InterpType, Pixbuf};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const THEME_ICON_SIZE: u16 = 128;

/// A file path or a freedesktop icon theme name.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

impl IconName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_ref());
    if path.exists() {
        return Some(path.to_path_buf());
    }

    lookup(icon_name.as_ref())
        .with_size(THEME_ICON_SIZE)
        .with_scale(1)
        .find()
}

pub fn load_pixbuf(icon_name: &IconName) -> Result<Pixbuf, MenuError> {
    let path = find_icon_path(icon_name)
        .ok_or_else(|| MenuError::MissingResource(icon_name.to_string()))?;

    Pixbuf::from_file(&path).map_err(|e| {
        log::warn!("Failed to decode icon {}: {}", path.display(), e);
        MenuError::MissingResource(icon_name.to_string())
    })
}

/// Copy of `pixbuf` painted onto a transparent canvas at low opacity.
pub fn disabled_variant(pixbuf: &Pixbuf) -> Option<Pixbuf> {
    let (width, height) = (pixbuf.width(), pixbuf.height());
    let dimmed = Pixbuf::new(Colorspace::Rgb, true, 8, width, height)?;
    dimmed.fill(0x0000_0000);

    let overall_alpha = (DISABLED_ICON_OPACITY * 255.0).round() as i32;
    pixbuf.composite(
        &dimmed,
        0,
        0,
        width,
        height,
        0.0,
        0.0,
        1.0,
        1.0,
        InterpType::Nearest,
        overall_alpha,
    );

    Some(dimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(rgba: u32) -> Pixbuf {
        let pixbuf = Pixbuf::new(Colorspace::Rgb, true, 8, 4, 4).unwrap();
        pixbuf.fill(rgba);
        pixbuf
    }

    #[test]
    fn test_disabled_variant_is_translucent() {
        let icon = solid(0xff00_00ff);
        let dimmed = disabled_variant(&icon).unwrap();

        assert_eq!((dimmed.width(), dimmed.height()), (4, 4));
        assert!(dimmed.has_alpha());

        let bytes = dimmed.read_pixel_bytes();
        let alpha = bytes[3];
        assert!((50..=52).contains(&alpha), "alpha was {alpha}");
    }

    #[test]
    fn test_empty_name_does_not_resolve() {
        assert_eq!(find_icon_path(&IconName::new("")), None);
    }

    #[test]
    fn test_missing_file_is_missing_resource() {
        let name = IconName::new("/nonexistent/pie-menu/icon.png");
        assert_eq!(
            load_pixbuf(&name).unwrap_err(),
            MenuError::MissingResource("/nonexistent/pie-menu/icon.png".to_string())
        );
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("pie-menu-test-icon.png");
        solid(0x00ff_00ff).savev(&path, "png", &[]).unwrap();

        let pixbuf = load_pixbuf(&IconName::new(path.to_string_lossy())).unwrap();
        assert_eq!((pixbuf.width(), pixbuf.height()), (4, 4));

        fs_err::remove_file(&path).unwrap();
    }
}
