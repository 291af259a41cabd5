//! Held-key input to paddle motion

use super::state::Paddle;

/// Move the paddle for one frame of held input.
///
/// Left applies `-speed`, right applies `+speed`; holding both cancels out.
/// The result is always clamped to the field.
pub fn apply_paddle_input(paddle: &mut Paddle, left: bool, right: bool) {
    let mut delta = 0;
    if left {
        delta -= paddle.speed;
    }
    if right {
        delta += paddle.speed;
    }
    paddle.move_by(delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PaddleSettings;

    fn paddle() -> Paddle {
        Paddle::new(&PaddleSettings::default(), 800)
    }

    #[test]
    fn test_left_and_right() {
        let mut p = paddle();
        apply_paddle_input(&mut p, true, false);
        assert_eq!(p.rect.left(), 342);
        apply_paddle_input(&mut p, false, true);
        apply_paddle_input(&mut p, false, true);
        assert_eq!(p.rect.left(), 358);
    }

    #[test]
    fn test_no_input_no_motion() {
        let mut p = paddle();
        apply_paddle_input(&mut p, false, false);
        assert_eq!(p.rect.left(), 350);
    }

    #[test]
    fn test_both_held_is_net_zero() {
        let mut p = paddle();
        apply_paddle_input(&mut p, true, true);
        assert_eq!(p.rect.left(), 350);
    }

    #[test]
    fn test_clamped_at_walls() {
        let mut p = paddle();
        for _ in 0..100 {
            apply_paddle_input(&mut p, true, false);
        }
        assert_eq!(p.rect.left(), 0);
        for _ in 0..200 {
            apply_paddle_input(&mut p, false, true);
        }
        assert_eq!(p.rect.left(), 700);
    }
}
