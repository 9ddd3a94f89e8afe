use engine::Vec2;

/// Moves `position` along the (already normalised) input axis.
pub(crate) fn integrate_player(position: Vec2, axis: Vec2, speed: f32, dt_seconds: f32) -> Vec2 {
    if !(dt_seconds.is_finite() && dt_seconds > 0.0) {
        return position;
    }
    position + axis * (speed * dt_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_speed_times_dt_along_axis() {
        let moved = integrate_player(Vec2::ZERO, Vec2::new(1.0, 0.0), 105.0, 0.5);
        assert_eq!(moved, Vec2::new(52.5, 0.0));
    }

    #[test]
    fn zero_axis_stays_put() {
        let start = Vec2::new(3.0, 4.0);
        assert_eq!(integrate_player(start, Vec2::ZERO, 105.0, 0.016), start);
    }

    #[test]
    fn invalid_dt_is_ignored() {
        let start = Vec2::new(3.0, 4.0);
        let axis = Vec2::new(0.0, 1.0);
        assert_eq!(integrate_player(start, axis, 105.0, -1.0), start);
        assert_eq!(integrate_player(start, axis, 105.0, f32::NAN), start);
    }
}
