//! Endpoint behaviour against a simulated board.
use pinctl::gpio::SimulatedLed;
use pinctl::{
    DEFAULT_MAX_SAMPLES, Dispatcher, Method, Mode, PinConfig, PinController, Request,
    SimulatedBoard, StatusCode,
};

fn dispatcher() -> Dispatcher<SimulatedBoard, SimulatedLed> {
    Dispatcher::new(
        PinController::new(SimulatedBoard::new(1234)),
        SimulatedLed::new(13),
        DEFAULT_MAX_SAMPLES,
    )
}

fn get(path: &str, params: &[(&str, &str)]) -> Request {
    request(Method::Get, path, params)
}

fn request(method: Method, path: &str, params: &[(&str, &str)]) -> Request {
    params
        .iter()
        .fold(Request::new(method, path), |r, (n, v)| r.with_param(*n, *v))
}

/// GET /data?pin=5&len=3 returns exactly three comma-separated readings.
#[test]
fn data_returns_requested_number_of_samples() {
    let mut d = dispatcher();
    let response = d.dispatch(&get("/data", &[("pin", "5"), ("len", "3")]));
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type, "text/csv");
    assert!(!response.body.starts_with(','));
    assert!(!response.body.ends_with(','));
    let values: Vec<u16> = response
        .body
        .split(',')
        .map(|v| v.parse().expect("integer sample"))
        .collect();
    assert_eq!(values.len(), 3);
    assert!(values.iter().all(|v| *v <= SimulatedBoard::ADC_MAX));
    assert_eq!(d.controller().platform().analog_reads(), 3);
}

/// A length of zero is treated as malformed.
#[test]
fn data_rejects_zero_length() {
    let mut d = dispatcher();
    let response = d.dispatch(&get("/data", &[("pin", "5"), ("len", "0")]));
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, "Bad Request\n\nlen= \"0\"\n");
    assert_eq!(d.controller().platform().analog_reads(), 0);
}

#[test]
fn data_parameter_errors() {
    let mut d = dispatcher();

    let response = d.dispatch(&get("/data", &[("len", "3")]));
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, "Bad Request\n\npin is empty\n");

    let response = d.dispatch(&get("/data", &[("pin", "0"), ("len", "3")]));
    assert_eq!(response.body, "Bad Request\n\npin= \"0\"\n");

    let response = d.dispatch(&get("/data", &[("pin", "5")]));
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, "Bad Request\n\nlen is empty\n");

    let response = d.dispatch(&get("/data", &[("pin", "5"), ("len", "lots")]));
    assert_eq!(response.body, "Bad Request\n\nlen= \"lots\"\n");

    let too_many = (DEFAULT_MAX_SAMPLES + 1).to_string();
    let response = d.dispatch(&get("/data", &[("pin", "5"), ("len", too_many.as_str())]));
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);

    let response = d.dispatch(&get("/data", &[("pin", "5"), ("len", "3"), ("mode", "analog")]));
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, "Bad Request\n\nmode= \"analog\"\n");

    assert_eq!(d.controller().platform().analog_reads(), 0);
}

#[test]
fn data_empty_mode_means_analog() {
    let mut d = dispatcher();
    let response = d.dispatch(&get("/data", &[("pin", "5"), ("len", "2"), ("mode", "")]));
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.split(',').count(), 2);
}

#[test]
fn data_digital_is_not_implemented() {
    let mut d = dispatcher();
    // No length needed: digital is refused first.
    let response = d.dispatch(&get("/data", &[("pin", "5"), ("mode", "digital")]));
    assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);
    assert!(response.body.starts_with("Not Implemented"));
    assert_eq!(d.controller().platform().analog_reads(), 0);
}

/// PUT /data is a stub whatever else is sent.
#[test]
fn data_put_is_not_implemented() {
    let mut d = dispatcher();
    let cases: [&[(&str, &str)]; 4] = [
        &[("pin", "4")],
        &[("pin", "4"), ("mode", "digital")],
        &[("pin", "4"), ("mode", "bogus"), ("val", "12")],
        &[("pin", "4"), ("len", "0")],
    ];
    for params in cases {
        let response = d.dispatch(&request(Method::Put, "/data", params));
        assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED, "{params:?}");
        assert!(response.body.starts_with("Not Implemented"));
    }
}

#[test]
fn data_other_methods_not_allowed() {
    let mut d = dispatcher();
    let response = d.dispatch(&request(Method::Post, "/data", &[("pin", "4")]));
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, "Method Not Allowed");
}

/// POST then GET on /opts reports the numeric code of the configured mode.
#[test]
fn opts_set_then_get() {
    let mut d = dispatcher();
    let response = d.dispatch(&request(
        Method::Post,
        "/opts",
        &[("q", "io"), ("pin", "4"), ("val", "INPUT")],
    ));
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "OK");

    let response = d.dispatch(&get("/opts", &[("q", "io"), ("pin", "4")]));
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Mode::Input.code().to_string());
    assert_eq!(response.body, "1");
}

/// The mode reaches the board as its electrical flags.
#[test]
fn opts_post_drives_pin_configuration() {
    let mut d = dispatcher();
    d.dispatch(&request(
        Method::Post,
        "/opts",
        &[("q", "io"), ("pin", "4"), ("val", "5")],
    ));
    assert_eq!(
        d.controller().platform().pin_config(4),
        Some(PinConfig {
            input: true,
            pullup: true,
            ..PinConfig::default()
        })
    );

    // A rejected mode leaves the pin as it was.
    d.dispatch(&request(
        Method::Post,
        "/opts",
        &[("q", "io"), ("pin", "4"), ("val", "input")],
    ));
    assert!(d.controller().platform().pin_config(4).unwrap().pullup);
    assert_eq!(d.controller().platform().pin_config(5), None);
}

#[test]
fn opts_unset_pin_reports_zero() {
    let mut d = dispatcher();
    let response = d.dispatch(&get("/opts", &[("q", "IO"), ("pin", "200")]));
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "0");
}

#[test]
fn opts_accepts_numeric_codes_and_sentinel() {
    let mut d = dispatcher();
    for (val, expected) in [("192", "192"), ("223", "223"), ("OUTPUT_OPEN_DRAIN", "19")] {
        let set = request(Method::Post, "/opts", &[("q", "Io"), ("pin", "9"), ("val", val)]);
        assert_eq!(d.dispatch(&set).body, "OK");
        let response = d.dispatch(&get("/opts", &[("q", "iO"), ("pin", "9")]));
        assert_eq!(response.body, expected);
    }
}

#[test]
fn opts_last_write_wins() {
    let mut d = dispatcher();
    for val in ["INPUT", "ANALOG", "PULLDOWN"] {
        d.dispatch(&request(Method::Post, "/opts", &[("q", "io"), ("pin", "6"), ("val", val)]));
    }
    let response = d.dispatch(&get("/opts", &[("q", "io"), ("pin", "6")]));
    assert_eq!(response.body, Mode::Pulldown.code().to_string());
    assert_eq!(d.controller().platform().applied_modes().len(), 3);
}

#[test]
fn opts_invalid_mode_is_rejected_without_side_effects() {
    let mut d = dispatcher();
    d.dispatch(&request(Method::Post, "/opts", &[("q", "io"), ("pin", "4"), ("val", "ANALOG")]));
    let response = d.dispatch(&request(
        Method::Post,
        "/opts",
        &[("q", "io"), ("pin", "4"), ("val", "analog")],
    ));
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, "Bad Request\n\npin;val= \"4;analog\"\n");

    let response = d.dispatch(&get("/opts", &[("q", "io"), ("pin", "4")]));
    assert_eq!(response.body, "192");
    assert_eq!(d.controller().platform().applied_modes(), [(4, Mode::Analog)]);
}

#[test]
fn opts_post_requires_val() {
    let mut d = dispatcher();
    let response = d.dispatch(&request(Method::Post, "/opts", &[("q", "io"), ("pin", "4")]));
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, "Bad Request\n\nval is empty\n");
}

/// A `q` outside the four accepted spellings gets a 400 for every method.
#[test]
fn opts_unknown_query_is_bad_request() {
    let mut d = dispatcher();
    for method in [Method::Get, Method::Post, Method::Put, Method::Other("DELETE".into())] {
        for q in ["wifi", "IO ", "i0", "ioo"] {
            let response = d.dispatch(&request(method.clone(), "/opts", &[("q", q), ("pin", "4")]));
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{method} {q:?}");
            assert_eq!(response.body, format!("Bad Request\n\nq= \"{q}\"\n"));
        }
    }
}

#[test]
fn opts_missing_query() {
    let mut d = dispatcher();
    let response = d.dispatch(&get("/opts", &[("pin", "4")]));
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, "Bad Request\n\nq is empty\n");
}

#[test]
fn opts_other_methods_not_allowed() {
    let mut d = dispatcher();
    let response = d.dispatch(&request(Method::Put, "/opts", &[("q", "io"), ("pin", "4")]));
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, "Method Not Allowed");
}

#[test]
fn status_page_pulses_led() {
    let mut d = dispatcher();
    let response = d.dispatch(&get("/", &[]));
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type, "text/html");
    assert!(response.body.contains("Uptime: 00:00:"));
    assert!(response.body.contains("<img src=\"/test.svg\" />"));
    assert_eq!(d.led().pulses(), 1);
    assert!(d.led().level().is_low());
}

#[test]
fn graph_and_inline() {
    let mut d = dispatcher();
    let response = d.dispatch(&get("/test.svg", &[]));
    assert_eq!(response.content_type, "image/svg+xml");
    assert_eq!(response.body.matches("<line ").count(), 38);
    assert!(response.body.ends_with("</svg>\n"));

    let response = d.dispatch(&get("/inline", &[]));
    assert_eq!(response.body, "this works as well");
}

#[test]
fn not_found_lists_arguments() {
    let mut d = dispatcher();
    let response = d.dispatch(&request(
        Method::Post,
        "/nowhere",
        &[("a", "1"), ("b", "two")],
    ));
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body,
        "File Not Found\n\nURI: /nowhere\nMethod: POST\nArguments: 2\n a: 1\n b: two\n"
    );
    assert_eq!(d.led().pulses(), 1);
}
