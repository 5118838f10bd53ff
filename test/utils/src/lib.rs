/// A morning of readings from a pot drying out until watering kicks in,
/// as (minutes, percentage) pairs.
pub fn moisture_fixture() -> Vec<(f64, f64)> {
    return vec![
        (0.0, 71.0),
        (10.0, 66.5),
        (20.0, 61.0),
        (30.0, 55.0),
        (40.0, 48.5),
        (50.0, 43.0),
        (60.0, 38.0),
        (70.0, 74.0),
        (75.0, 72.5),
    ];
}

pub fn config_fixture() -> &'static str {
    return r#"
# Serial port the watering board is attached to.
port = "/dev/ttyUSB0"

baud-rate = 9600
timeout = 1.5
threshold = 35
interval = 2.5
"#
    .trim();
}

pub fn bad_config_fixture() -> &'static str {
    return r#"
port = "/dev/ttyUSB0"
threshold = 250
"#
    .trim();
}
