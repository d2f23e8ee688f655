use lane_control::{ControlInput, ControlState, FileGains, LateralController, StaticGains};
use nalgebra::{Rotation2, Vector2};

fn main() {
    // Tuning comes from gains.toml in the working directory when present.
    let gains = FileGains::default().snapshot().unwrap_or_else(|err| {
        eprintln!("using built-in gains ({err})");
        StaticGains::new(2.5, 0.1, 5.0).unwrap()
    });
    let controller = LateralController::new(gains);

    let dt = 0.05;
    let mut position = Vector2::new(0., 0.6);
    let mut heading = 0.0_f32;
    // Seed the previous error with the starting offset so the derivative
    // term does not kick on the first tick.
    let mut state = ControlState {
        error: -position.y,
        integral: 0.,
    };

    for tick in 0..200 {
        let output = controller
            .steering_control(
                ControlInput {
                    forward_speed: 0.3,
                    target_position: 0.,
                    estimated_position: position.y,
                    time_delta: dt,
                },
                state,
            )
            .expect("control tick");
        state = output.state;

        heading += output.angular_velocity * dt;
        position += Rotation2::new(heading) * Vector2::new(output.forward_speed * dt, 0.);

        if tick % 20 == 0 {
            println!(
                "t={:5.2}s  y={:+.3}  omega={:+.3}",
                tick as f32 * dt,
                position.y,
                output.angular_velocity
            );
        }
    }

    println!("final offset: {:+.3}", position.y);
}
