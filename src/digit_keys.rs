use bevy::prelude::KeyCode;

/// Burst sizes bound to the number row and keypad: 1 spawns 10, 0 spawns 100.
pub const DIGIT_BURSTS: [(KeyCode, usize); 20] = [
    (KeyCode::Digit1, 10),
    (KeyCode::Digit2, 20),
    (KeyCode::Digit3, 30),
    (KeyCode::Digit4, 40),
    (KeyCode::Digit5, 50),
    (KeyCode::Digit6, 60),
    (KeyCode::Digit7, 70),
    (KeyCode::Digit8, 80),
    (KeyCode::Digit9, 90),
    (KeyCode::Digit0, 100),
    (KeyCode::Numpad1, 10),
    (KeyCode::Numpad2, 20),
    (KeyCode::Numpad3, 30),
    (KeyCode::Numpad4, 40),
    (KeyCode::Numpad5, 50),
    (KeyCode::Numpad6, 60),
    (KeyCode::Numpad7, 70),
    (KeyCode::Numpad8, 80),
    (KeyCode::Numpad9, 90),
    (KeyCode::Numpad0, 100),
];

/// Burst size bound to a digit key, `None` for any other key.
pub fn burst_size(key: &KeyCode) -> Option<usize> {
    DIGIT_BURSTS
        .iter()
        .find(|(digit, _)| digit == key)
        .map(|(_, count)| *count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_sizes() {
        assert_eq!(burst_size(&KeyCode::Digit1), Some(10));
        assert_eq!(burst_size(&KeyCode::Numpad5), Some(50));
        assert_eq!(burst_size(&KeyCode::Digit0), Some(100));
        assert_eq!(burst_size(&KeyCode::KeyF), None);
    }

    #[test]
    fn test_number_row_matches_keypad() {
        let (row, pad) = DIGIT_BURSTS.split_at(10);
        for ((_, a), (_, b)) in row.iter().zip(pad) {
            assert_eq!(a, b);
        }
    }
}
