use test_utils::moisture_fixture;

use super::x_ticks;
use super::PlotWindow;
use crate::domain::services::Sample;

fn samples(times: &[f64]) -> Vec<Sample> {
    return times
        .iter()
        .map(|time| {
            return Sample {
                time: *time,
                percentage: 50.0,
            };
        })
        .collect();
}

#[test]
fn it_ticks_exact_multiples() {
    assert_eq!(x_ticks(30.0), vec![0, 10, 20, 30]);
}

#[test]
fn it_adds_a_tick_for_remainders() {
    assert_eq!(x_ticks(34.0), vec![0, 10, 20, 30, 40]);
    assert_eq!(x_ticks(0.5), vec![0, 10]);
}

#[test]
fn it_ticks_zero() {
    assert_eq!(x_ticks(0.0), vec![0]);
}

#[test]
fn it_widens_the_step_for_long_histories() {
    let ticks = x_ticks(1000.0);

    assert_eq!(ticks.len(), 21);
    assert_eq!(ticks[1], 50);
    assert_eq!(*ticks.last().unwrap(), 1000);
}

#[test]
fn it_caps_ticks_for_huge_times() {
    for time in [1e10, 1e300, f64::INFINITY] {
        let ticks = x_ticks(time);

        assert!(ticks.len() <= 21);
        assert!(ticks.windows(2).all(|e| return e[0] < e[1]));
        assert!(*ticks.last().unwrap() >= 1_000_000_000);
    }

    let window = PlotWindow::from_samples(&samples(&[1.0, 1e10]));
    assert!(window.x_ticks.len() <= 21);
}

#[test]
fn it_uses_an_hour_for_short_histories() {
    let window = PlotWindow::from_samples(&samples(&[1.0, 12.0, 49.0]));

    assert_eq!(window.x_ticks, vec![0, 10, 20, 30, 40, 50, 60]);
    assert_eq!(window.x_bounds, [-2.0, 60.0]);
    assert_eq!(window.y_bounds, [-2.0, 110.0]);
}

#[test]
fn it_handles_empty_history() {
    let window = PlotWindow::from_samples(&[]);

    assert_eq!(window.x_ticks, vec![0, 10, 20, 30, 40, 50, 60]);
    assert_eq!(window.x_bounds, [-2.0, 60.0]);
}

#[test]
fn it_grows_with_long_histories() {
    let fixture = moisture_fixture()
        .into_iter()
        .map(|(time, percentage)| return Sample { time, percentage })
        .collect::<Vec<Sample>>();
    let window = PlotWindow::from_samples(&fixture);

    assert_eq!(window.x_ticks, vec![0, 10, 20, 30, 40, 50, 60, 70, 80]);
    assert_eq!(window.x_bounds, [-2.0, 80.0]);
    assert_eq!(PlotWindow::points(&fixture)[8], (75.0, 72.5));
}

#[test]
fn it_draws_threshold_across_the_window() {
    let window = PlotWindow::from_samples(&samples(&[125.0]));
    assert_eq!(
        window.threshold_line(35),
        vec![(-2.0, 35.0), (130.0, 35.0)]
    );
}

#[test]
fn it_labels_axes() {
    let window = PlotWindow::from_samples(&[]);

    insta::assert_snapshot!(window.x_labels().join(","), @"0,10,20,30,40,50,60");
    insta::assert_snapshot!(window.y_labels().join(","), @"0%,25%,50%,75%,100%");
}
