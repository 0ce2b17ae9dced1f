use tactica_core::{BallState, InterceptSettings, Vector2, VectorExt, DEGENERATE_EPS};

/// Distance a ball launched at `speed` covers in `time` seconds under a constant
/// deceleration of `friction`. The ball stops once its speed reaches zero, it never
/// rolls backwards.
pub fn ball_travel(speed: f64, friction: f64, time: f64) -> f64 {
    let time = if friction > 0.0 {
        time.min(speed / friction)
    } else {
        time
    };
    (speed * time - 0.5 * friction.max(0.0) * time * time).max(0.0)
}

/// Where the ball will be after `time` seconds, assuming it keeps its heading.
pub fn ball_position_at(ball: &BallState, friction: f64, time: f64) -> Vector2 {
    match ball.velocity.try_unit() {
        Ok(heading) => ball.position + heading * ball_travel(ball.speed(), friction, time),
        Err(_) => ball.position,
    }
}

/// Predicts the point where an agent at `agent` moving at up to `max_speed` can meet
/// the ball.
///
/// Every candidate time is scored by how badly the agent's arrival time misses the
/// ball's, relative to the candidate time. The first best candidate wins; if none is
/// good enough the agent aims a fixed lead ahead of the ball instead.
pub fn predict_intercept(
    ball: &BallState,
    agent: Vector2,
    max_speed: f64,
    friction: f64,
    settings: &InterceptSettings,
) -> Vector2 {
    if ball.velocity.try_unit().is_err() || ball.speed() < settings.still_speed {
        return ball.position;
    }

    let mut best_time = None;
    let mut best_score = f64::INFINITY;
    for &t in &settings.candidate_times {
        let future = ball_position_at(ball, friction, t);
        let agent_time = if max_speed > DEGENERATE_EPS {
            (future - agent).norm() / max_speed
        } else {
            f64::INFINITY
        };
        let score = (agent_time - t).abs() / t.max(settings.min_normalizing_time);
        if score < best_score {
            best_score = score;
            best_time = Some(t);
        }
    }

    match best_time {
        Some(t) if best_score < settings.feasibility => ball_position_at(ball, friction, t),
        _ => {
            log::trace!("no feasible intercept (best score {best_score}), leading the ball");
            ball_position_at(ball, friction, settings.fallback_lead)
        }
    }
}
