use super::*;

const DEVICES: &str = "List of devices attached\n\
emulator-5554\tdevice\n\
R58M123ABC\tunauthorized\n\
0123456789ABCDEF\tdevice  \n\
\n";

#[test]
fn device_list_keeps_ready_devices_only() {
    assert_eq!(
        parse_device_list(DEVICES),
        ["emulator-5554", "0123456789ABCDEF"]
    );
    assert!(parse_device_list("List of devices attached\n\n").is_empty());
}

#[test]
fn device_choice_needs_exactly_one() {
    assert_eq!(
        choose_device(&["emulator-5554".to_owned()]).unwrap(),
        "emulator-5554"
    );
    assert!(matches!(
        choose_device(&[]),
        Err(ReelError::ResourceNotFound(_))
    ));

    let err = choose_device(&["a".to_owned(), "b".to_owned()]).unwrap_err();
    assert_eq!(
        err.as_validation().map(|v| v.field.as_str()),
        Some("adb_serial")
    );
    assert!(err.to_string().contains("[a, b]"));
}

#[test]
fn instrument_request_builds_am_arguments() {
    let req = InstrumentRequest {
        application_id: "com.example.demo",
        test_class: "com.example.CaptureTest",
        registry_class: "com.example.Registry",
        scenario: "counter",
        output_subdir: "gif-recorder",
    };
    assert_eq!(
        req.args(),
        [
            "shell",
            "am",
            "instrument",
            "-w",
            "-e",
            "class",
            "com.example.CaptureTest#captureScenario",
            "-e",
            "registry_class",
            "com.example.Registry",
            "-e",
            "scenario_name",
            "counter",
            "-e",
            "output_subdir",
            "gif-recorder",
            "com.example.demo.test/androidx.test.runner.AndroidJUnitRunner",
        ]
    );
    assert_eq!(
        req.remote_dir(),
        "/sdcard/Android/data/com.example.demo/files/gif-recorder/counter"
    );
}

#[test]
fn explicit_serial_skips_device_listing() {
    let dev = AdbDevice::connect("adb-not-installed", " emulator-5556 ").unwrap();
    assert_eq!(dev.serial(), "emulator-5556");
    assert_eq!(
        dev.command(["shell", "ls"]).command_line(),
        "adb-not-installed -s emulator-5556 shell ls"
    );
}

#[test]
fn failed_instrumentation_reports_are_errors() {
    assert!(check_instrument_output("adb", "OK (1 test)\n").is_ok());
    let err = check_instrument_output("adb shell am instrument", "FAILURES!!!\nTests run: 1")
        .unwrap_err();
    assert!(matches!(err, ReelError::PipelineExecution { .. }));
    assert!(err.to_string().contains("FAILURES!!!"));
}
