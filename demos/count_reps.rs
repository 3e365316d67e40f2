//! Count repetitions from a synthetic landmark stream

use repform::{LandmarkSet, Point, ProfileTable, WorkoutEvaluator};

fn arm_frame(wrist: (f64, f64)) -> LandmarkSet {
    let mut set = LandmarkSet::new();
    set.set("left_shoulder", Point::new(0.3, 0.3));
    set.set("left_elbow", Point::new(0.5, 0.3));
    set.set("left_wrist", Point::new(wrist.0, wrist.1));
    set
}

fn main() {
    let table = ProfileTable::builtin();
    let mut exercises: Vec<&str> = table.names().collect();
    exercises.sort_unstable();
    println!("exercises: {}", exercises.join(", "));

    let mut evaluator = WorkoutEvaluator::new(table);
    evaluator.start_exercise("push_up");

    // Two full extend→contract cycles, with a mid-bend frame in between
    let frames = [
        arm_frame((0.7, 0.3)),
        arm_frame((0.65, 0.45)),
        arm_frame((0.5, 0.5)),
        arm_frame((0.7, 0.3)),
        arm_frame((0.5, 0.5)),
        arm_frame((0.7, 0.3)),
        arm_frame((0.5, 0.5)),
    ];

    for (i, frame) in frames.iter().enumerate() {
        if let Some(result) = evaluator.evaluate_frame(frame) {
            println!(
                "frame {i}: angle {:6.1}° state {:8} reps {} score {}{}",
                result.angle_deg,
                result.state.as_str(),
                result.repetition_count,
                result.score,
                if result.repetition_completed {
                    "  << repetition"
                } else {
                    ""
                }
            );
        }
    }

    let summary = evaluator.finish().unwrap();
    println!("{}", serde_json::to_string_pretty(&summary).unwrap());
}
