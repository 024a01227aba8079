use super::*;

const STEP_COUNTS: &[usize] = &[1, 2, 3, 7, 10, 50, 100, 333];

fn model(thresholds: &[f64]) -> ZoneModel {
    ZoneModel::build(thresholds).expect("fixture thresholds are valid")
}

fn path(steps: usize, rising: bool) -> Vec<f64> {
    (0..=steps)
        .map(|i| {
            let i = if rising { i } else { steps - i };
            i as f64 / steps as f64
        })
        .collect()
}

fn crossings_along(model: &ZoneModel, values: &[f64]) -> Vec<Crossing> {
    values
        .windows(2)
        .filter_map(|pair| model.evaluate(pair[0], pair[1]).crossing())
        .collect()
}

#[test]
fn single_threshold_is_reported_once_on_the_way_up() {
    for &t in &[0.05, 0.3, 0.5, 0.77, 0.95, 1.0] {
        let model = model(&[t]);
        for &steps in STEP_COUNTS {
            let crossings = crossings_along(&model, &path(steps, true));
            assert_eq!(
                crossings,
                vec![Crossing {
                    threshold_index: 0,
                    increased: true
                }],
                "threshold {t}, {steps} steps"
            );
        }
    }
}

#[test]
fn single_threshold_is_reported_once_on_the_way_down() {
    for &t in &[0.0, 0.05, 0.3, 0.5, 0.77, 0.95] {
        let model = model(&[t]);
        for &steps in STEP_COUNTS {
            let crossings = crossings_along(&model, &path(steps, false));
            assert_eq!(
                crossings,
                vec![Crossing {
                    threshold_index: 0,
                    increased: false
                }],
                "threshold {t}, {steps} steps"
            );
        }
    }
}

#[test]
fn skipping_thresholds_upward_reports_the_farthest() {
    let model = model(&[0.25, 0.75]);
    assert_eq!(model.evaluate(0.1, 0.9), CrossingResult::crossed(1, true));
}

#[test]
fn skipping_thresholds_downward_reports_the_farthest() {
    let model = model(&[0.25, 0.75]);
    assert_eq!(model.evaluate(0.9, 0.1), CrossingResult::crossed(0, false));
}

#[test]
fn skipping_from_a_threshold_counts_only_the_ones_stepped_over() {
    let model = model(&[0.25, 0.5, 0.75]);
    assert_eq!(model.evaluate(0.25, 0.9), CrossingResult::crossed(2, true));
    assert_eq!(model.evaluate(0.75, 0.3), CrossingResult::crossed(1, false));
}

#[test]
fn landing_exactly_on_a_threshold_reports_it() {
    let model = model(&[0.25, 0.75]);
    assert_eq!(model.evaluate(0.1, 0.25), CrossingResult::crossed(0, true));
    assert_eq!(model.evaluate(0.9, 0.75), CrossingResult::crossed(1, false));
    assert_eq!(model.evaluate(0.1, 0.75), CrossingResult::crossed(1, true));
}

#[test]
fn leaving_a_threshold_into_the_next_gap_is_not_a_crossing() {
    let model = model(&[0.25, 0.75]);
    assert_eq!(model.evaluate(0.75, 0.8), CrossingResult::NoCrossing);
    assert_eq!(model.evaluate(0.25, 0.2), CrossingResult::NoCrossing);
}

#[test]
fn unchanged_value_never_crosses() {
    for thresholds in [&[][..], &[0.0][..], &[0.5][..], &[0.25, 0.75][..]] {
        let model = model(thresholds);
        for value in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(model.evaluate(value, value), CrossingResult::NoCrossing);
        }
    }
}

#[test]
fn movement_inside_one_gap_is_ignored() {
    let model = model(&[0.5]);
    assert_eq!(model.evaluate(0.1, 0.2), CrossingResult::NoCrossing);
    assert_eq!(model.evaluate(0.9, 0.6), CrossingResult::NoCrossing);
}

#[test]
fn empty_configuration_never_crosses() {
    let model = ZoneModel::empty();
    assert_eq!(model.evaluate(0.0, 1.0), CrossingResult::NoCrossing);
    assert_eq!(model.evaluate_initial(0.0), CrossingResult::NoCrossing);
    assert_eq!(model.evaluate_initial(0.7), CrossingResult::NoCrossing);
}

#[test]
fn values_outside_the_partition_degrade_to_no_crossing() {
    let model = model(&[0.5]);
    assert_eq!(model.evaluate(0.2, 1.4), CrossingResult::NoCrossing);
    assert_eq!(model.evaluate(-0.3, 0.7), CrossingResult::NoCrossing);
    assert_eq!(model.evaluate(0.2, f64::NAN), CrossingResult::NoCrossing);
}

#[test]
fn malformed_index_set_degrades_to_no_crossing() {
    let zones = [
        Zone::ClosedOpen {
            start: 0.0,
            end: 0.5,
        },
        Zone::point(0.5),
        Zone::OpenClosed {
            start: 0.5,
            end: 1.0,
        },
    ];
    assert_eq!(evaluate(0.1, 0.5, &zones, &[]), CrossingResult::NoCrossing);
    assert_eq!(
        evaluate(0.1, 0.5, &zones, &[1]),
        CrossingResult::crossed(0, true)
    );
}

#[test]
fn initial_zero_on_zero_threshold_is_reached_by_decrease() {
    assert_eq!(
        model(&[0.0]).evaluate_initial(0.0),
        CrossingResult::crossed(0, false)
    );
    assert_eq!(
        model(&[0.0, 0.5]).evaluate_initial(0.0),
        CrossingResult::crossed(0, false)
    );
}

#[test]
fn initial_zero_without_zero_threshold_is_silent() {
    assert_eq!(model(&[0.5]).evaluate_initial(0.0), CrossingResult::NoCrossing);
}

#[test]
fn initial_non_zero_value_is_a_step_up_from_zero() {
    assert_eq!(
        model(&[0.25, 0.75]).evaluate_initial(0.8),
        CrossingResult::crossed(1, true)
    );
    assert_eq!(
        model(&[0.0, 0.5]).evaluate_initial(0.5),
        CrossingResult::crossed(1, true)
    );
    assert_eq!(
        model(&[0.0, 0.5]).evaluate_initial(0.3),
        CrossingResult::NoCrossing
    );
    assert_eq!(
        model(&[0.25]).evaluate_initial(0.1),
        CrossingResult::NoCrossing
    );
}
