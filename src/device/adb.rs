use std::path::Path;

use crate::encode::tools::{ToolCommand, run_checked};
use crate::foundation::error::{ReelError, ReelResult};

/// Serial value that asks for the single connected device.
pub const AUTO_SERIAL: &str = "auto";

/// Runner the instrumentation targets inside the test APK.
pub const TEST_RUNNER: &str = "androidx.test.runner.AndroidJUnitRunner";

/// Test method that captures one scenario on the device.
pub const CAPTURE_METHOD: &str = "captureScenario";

/// Serials of attached devices in `adb devices` output.
///
/// The header line is skipped; only rows in the `device` state count (offline and
/// unauthorized devices are ignored).
pub fn parse_device_list(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| line.ends_with("\tdevice"))
        .filter_map(|line| line.split('\t').next())
        .map(str::to_owned)
        .collect()
}

/// Pick the only attached device.
pub fn choose_device(devices: &[String]) -> ReelResult<String> {
    match devices {
        [] => Err(ReelError::resource(
            "no connected Android device/emulator found",
        )),
        [only] => Ok(only.clone()),
        many => Err(ReelError::validation(
            "adb_serial",
            format!(
                "multiple devices found: [{}]. Configure adb_serial.",
                many.join(", ")
            ),
        )),
    }
}

/// Device-side directory a scenario's frames are written to.
pub fn remote_scenario_dir(application_id: &str, subdir: &str, scenario: &str) -> String {
    format!("/sdcard/Android/data/{application_id}/files/{subdir}/{scenario}")
}

/// Parameters of one on-device capture run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstrumentRequest<'a> {
    /// Application id of the app under test.
    pub application_id: &'a str,
    /// Fully qualified capture test class.
    pub test_class: &'a str,
    /// Fully qualified scenario registry class.
    pub registry_class: &'a str,
    /// Scenario to capture.
    pub scenario: &'a str,
    /// Subdirectory of the app's external files dir to write into.
    pub output_subdir: &'a str,
}

impl InstrumentRequest<'_> {
    /// `shell am instrument` arguments (without the `-s <serial>` prefix).
    pub fn args(&self) -> Vec<String> {
        let class = format!("{}#{CAPTURE_METHOD}", self.test_class);
        let runner = format!("{}.test/{TEST_RUNNER}", self.application_id);
        let args: [&str; 17] = [
            "shell",
            "am",
            "instrument",
            "-w",
            "-e",
            "class",
            &class,
            "-e",
            "registry_class",
            self.registry_class,
            "-e",
            "scenario_name",
            self.scenario,
            "-e",
            "output_subdir",
            self.output_subdir,
            &runner,
        ];
        args.into_iter().map(str::to_owned).collect()
    }

    /// Device-side directory this request writes to.
    pub fn remote_dir(&self) -> String {
        remote_scenario_dir(self.application_id, self.output_subdir, self.scenario)
    }
}

/// `am instrument -w` exits 0 even when the test fails; detect that from its report.
pub fn check_instrument_output(command: &str, output: &str) -> ReelResult<()> {
    const FAILURE_MARKERS: [&str; 3] = ["FAILURES!!!", "INSTRUMENTATION_FAILED", "Process crashed"];
    if FAILURE_MARKERS.iter().any(|m| output.contains(m)) {
        return Err(ReelError::pipeline(command, output));
    }
    Ok(())
}

/// `adb` bound to one device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdbDevice {
    bin: String,
    serial: String,
}

impl AdbDevice {
    /// Bind to `serial`, or to the single attached device when it is [`AUTO_SERIAL`].
    pub fn connect(bin: &str, serial: &str) -> ReelResult<Self> {
        let serial = if serial.trim() == AUTO_SERIAL {
            let out = run_checked(&ToolCommand::new(bin).arg("devices"))?;
            choose_device(&parse_device_list(&out))?
        } else {
            serial.trim().to_owned()
        };
        tracing::debug!(%serial, "adb device selected");
        Ok(Self {
            bin: bin.to_owned(),
            serial,
        })
    }

    /// Device serial.
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// `adb -s <serial>` followed by `args`.
    pub fn command<I, S>(&self, args: I) -> ToolCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ToolCommand::new(&self.bin)
            .args(["-s", self.serial.as_str()])
            .args(args)
    }

    /// Run the capture instrumentation for one scenario and return its report.
    pub fn instrument(&self, request: &InstrumentRequest<'_>) -> ReelResult<String> {
        let cmd = self.command(request.args());
        let out = run_checked(&cmd)?;
        check_instrument_output(&cmd.command_line(), &out)?;
        Ok(out)
    }

    /// Copy the contents of `remote_dir` into `local_dir`.
    pub fn pull(&self, remote_dir: &str, local_dir: &Path) -> ReelResult<()> {
        let cmd = self
            .command(["pull".to_owned(), format!("{remote_dir}/.")])
            .path_arg(local_dir);
        run_checked(&cmd)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/adb.rs"]
mod tests;
