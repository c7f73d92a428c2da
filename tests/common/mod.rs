//! Common test utilities for pherf-installer integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A fake HDP host on disk: a built Phoenix checkout, an empty Phoenix
/// installation, HBase/Hadoop lib directories, a JDK and a Maven whose `mvn`
/// is a shell script.
pub struct TestHost {
    /// Temporary directory
    pub temp: TempDir,
    pub root: PathBuf,
}

impl TestHost {
    /// Create a new test host
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        let host = Self { temp, root };

        for dir in [
            "hdp/phoenix-client/lib",
            "hdp/phoenix-client/bin",
            "hdp/hbase-client/lib",
            "hdp/hadoop-client/lib",
            "jdk64/jdk1.8.0_60/bin",
            "fake-bin",
        ] {
            fs::create_dir_all(host.root.join(dir)).expect("Failed to create directory");
        }

        host.write_file("phoenix/phoenix-pherf/pom.xml", "<project/>");
        host.write_file(
            "phoenix/phoenix-pherf/src/main/resources/scenario/prod_test_unsalted_scenario.xml",
            "<scenario/>",
        );
        host.write_file(
            "phoenix/phoenix-pherf/target/phoenix-pherf-4.7.0-HBase-1.1.jar",
            "pherf jar",
        );
        host.write_file(
            "phoenix/phoenix-pherf/target/phoenix-pherf-4.7.0-HBase-1.1-minimal.jar",
            "pherf minimal jar",
        );
        host.write_file("phoenix/bin/pherf-cluster.py", "#!/usr/bin/env python\n");
        host.write_file("phoenix/bin/phoenix_utils.py", "# phoenix utils\n");
        host.write_file(
            "phoenix/phoenix-server-client/target/phoenix-4.7.0-HBase-1.1-thin-client.jar",
            "thin client",
        );
        host.write_file(
            "phoenix/phoenix-server/target/phoenix-server-4.7.0-HBase-1.1-runnable.jar",
            "query server",
        );
        host.write_file("pherf-configs/datamodel/create_prod_test_unsalted.sql", "CREATE TABLE t");
        host.write_file("hdp/phoenix-client/lib/commons-csv-1.0.jar", "csv");

        host.write_mvn(0);
        host.write_su(0, 0);
        host
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write a file under the host root
    pub fn write_file(&self, relative: &str, content: &str) {
        let file_path = self.root.join(relative);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file under the host root
    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative)).expect("Failed to read file")
    }

    /// Check if a file exists under the host root
    pub fn file_exists(&self, relative: &str) -> bool {
        self.root.join(relative).exists()
    }

    /// Replace `mvn` with a script that records its arguments and exits with `code`.
    pub fn write_mvn(&self, code: i32) {
        self.write_script(
            "apache-maven-3.2.5/bin/mvn",
            &format!(
                "#!/bin/sh\necho \"$(pwd -P)|$JAVA_HOME|$*\" >> \"{}\"\nexit {code}\n",
                self.path("mvn.log").display()
            ),
        );
    }

    /// Replace `su` with a script that records its arguments and exits with
    /// `stop_code` or `start_code` depending on the requested action.
    pub fn write_su(&self, stop_code: i32, start_code: i32) {
        self.write_script(
            "fake-bin/su",
            &format!(
                "#!/bin/sh\necho \"$*\" >> \"{log}\"\ncase \"$2\" in\n  *stop) exit {stop_code} ;;\n  *start) exit {start_code} ;;\nesac\nexit 99\n",
                log = self.path("su.log").display()
            ),
        );
    }

    fn write_script(&self, relative: &str, content: &str) {
        use std::os::unix::fs::PermissionsExt;

        self.write_file(relative, content);
        let path = self.path(relative);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
    }

    /// The installer binary pointed at this host, with the fake `su` first on `PATH`.
    pub fn installer_cmd(&self) -> Command {
        let mut cmd = self.installer_cmd_without_java_home();
        cmd.arg("--java-home").arg(self.path("jdk64/jdk1.8.0_60"));
        cmd
    }

    /// Like [`TestHost::installer_cmd`] but leaves the JDK to detection.
    pub fn installer_cmd_without_java_home(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("pherf-installer").expect("binary should be built");
        for (key, _) in std::env::vars_os() {
            if key.to_string_lossy().starts_with("PHERF_") {
                cmd.env_remove(key);
            }
        }
        cmd.env("PATH", prepend_path(&self.path("fake-bin")))
            .env_remove("RUST_LOG")
            .args(self.path_args());
        cmd
    }

    fn path_args(&self) -> Vec<String> {
        [
            ("--phoenix-home", "hdp/phoenix-client"),
            ("--hbase-home", "hdp/hbase-client"),
            ("--hadoop-home", "hdp/hadoop-client"),
            ("--phoenix-repo", "phoenix"),
            ("--maven-installation", "apache-maven-3.2.5"),
            ("--configs-dir", "pherf-configs"),
        ]
        .iter()
        .flat_map(|(flag, relative)| {
            [flag.to_string(), self.path(relative).display().to_string()]
        })
        .collect()
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}

fn prepend_path(dir: &Path) -> std::ffi::OsString {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(existing) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(paths).expect("PATH should be joinable")
}
