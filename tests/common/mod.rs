// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// CMakeLists content declaring a gtest target.
pub const GTEST_CMAKE: &str = r#"cmake_minimum_required(VERSION 3.0.2)
project(beta_pkg)

find_package(catkin REQUIRED COMPONENTS roscpp)

catkin_package()

include_directories(${catkin_INCLUDE_DIRS})

if(CATKIN_ENABLE_TESTING)
  catkin_add_gtest(${PROJECT_NAME}-test test/test_beta.cpp)
  target_link_libraries(${PROJECT_NAME}-test ${catkin_LIBRARIES})
endif()
"#;

/// CMakeLists content without any test declaration.
pub const PLAIN_CMAKE: &str = r#"cmake_minimum_required(VERSION 3.0.2)
project(alpha_pkg)

find_package(catkin REQUIRED)

catkin_package()
"#;

/// CMakeLists content declaring a metapackage.
pub const META_CMAKE: &str = r#"cmake_minimum_required(VERSION 3.0.2)
project(meta_pkg)
find_package(catkin REQUIRED)
catkin_metapackage()
"#;

/// Returns a realistic package manifest declaring `name`.
pub fn package_xml(name: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<package format="2">
  <name>{}</name>
  <version>0.1.0</version>
  <description>Test fixture package</description>
  <maintainer email="dev@example.com">dev</maintainer>
  <license>MIT</license>
  <buildtool_depend>catkin</buildtool_depend>
</package>
"#,
        name
    )
}

/// Creates one package directory (manifest plus CMakeLists) under `root` and
/// returns its path.
pub fn write_package(root: &Path, dir: &str, name: &str, cmake: &str) -> PathBuf {
    let package_dir = root.join(dir);
    fs::create_dir_all(&package_dir).expect("Failed to create package directory");
    fs::write(package_dir.join("package.xml"), package_xml(name))
        .expect("Failed to write package.xml");
    fs::write(package_dir.join("CMakeLists.txt"), cmake).expect("Failed to write CMakeLists.txt");
    package_dir
}

/// Writes an executable stub tool script (unix only) and returns its path.
#[cfg(unix)]
pub fn write_stub_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, script).expect("Failed to write stub tool");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make stub tool executable");
    path
}

/// A stub that appends its arguments to `log` and exits with `code`.
#[cfg(unix)]
pub fn logging_stub(log: &Path, code: i32) -> String {
    format!("#!/bin/sh\necho \"$@\" >> \"{}\"\nexit {}\n", log.display(), code)
}

/// A stub that appends its arguments to `log`, prints `stdout` and exits 0.
#[cfg(unix)]
pub fn printing_stub(log: &Path, stdout: &str) -> String {
    format!(
        "#!/bin/sh\necho \"$@\" >> \"{}\"\nprintf '%s\\n' \"{}\"\nexit 0\n",
        log.display(),
        stdout
    )
}
