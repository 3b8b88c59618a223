/// Notifications produced by the menu in response to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieEvent {
    ButtonClicked(usize),
    /// Only emitted when the close button acts as a regular button.
    CloseClicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    Other(u32),
}

impl From<u32> for MouseButton {
    fn from(button: u32) -> Self {
        match button {
            1 => MouseButton::Primary,
            2 => MouseButton::Middle,
            3 => MouseButton::Secondary,
            b => MouseButton::Other(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_numbers() {
        let cases = vec![
            (1, MouseButton::Primary),
            (2, MouseButton::Middle),
            (3, MouseButton::Secondary),
            (9, MouseButton::Other(9)),
        ];

        for (number, expected) in cases {
            assert_eq!(MouseButton::from(number), expected);
        }
    }
}
