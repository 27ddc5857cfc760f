//! # Package Discovery Module / 软件包发现模块
//!
//! Walks a source tree, locates every `package.xml` manifest and materializes
//! one [`Package`] descriptor per manifest, classification included. The
//! traversal is sorted so discovery order, and therefore report order, is
//! deterministic across runs.
//!
//! 遍历源码树，定位每个 `package.xml` 清单，并为每个清单物化一个
//! [`Package`] 描述符（包含分类）。遍历是排序的，因此发现顺序乃至报告顺序
//! 在多次运行之间是确定的。

use anyhow::{Context, Result, bail};
use colored::*;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::core::cmake;
use crate::core::models::Package;

/// Fixed file name of a package manifest. / 软件包清单的固定文件名。
pub const PACKAGE_MANIFEST: &str = "package.xml";

/// Fixed file name of the build configuration. / 构建配置的固定文件名。
pub const CMAKE_LISTS: &str = "CMakeLists.txt";

/// Recursively enumerates every `package.xml` under `root` and returns one
/// descriptor per manifest, in traversal order.
///
/// Zero manifests is an empty result, not an error. A malformed manifest or
/// an unreadable `CMakeLists.txt` is fatal for that package only: it is
/// skipped with a logged warning and the run continues.
///
/// 递归枚举 `root` 下的每个 `package.xml`，按遍历顺序为每个清单返回一个
/// 描述符。
///
/// 找到零个清单时返回空结果，而不是错误。清单格式错误或 `CMakeLists.txt`
/// 不可读仅对该软件包致命：记录一条警告后跳过，运行继续。
pub fn discover_packages(root: &Path) -> Result<Vec<Package>> {
    if !crate::infra::fs::is_directory(root) {
        bail!("Source path is not a directory: {}", root.display());
    }

    let mut packages = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("{} {}", "Warning: unreadable directory entry:".yellow(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() || entry.file_name().to_str() != Some(PACKAGE_MANIFEST) {
            continue;
        }

        match materialize(entry.path()) {
            Ok(package) => packages.push(package),
            Err(e) => {
                eprintln!("{} {:#}", "Warning: skipping package:".yellow(), e);
            }
        }
    }

    Ok(packages)
}

/// Builds one descriptor from a manifest path: the declared `<name>` becomes
/// the package identity, the manifest's directory becomes the package path,
/// and the classification is computed immediately from `CMakeLists.txt`.
///
/// 从一个清单路径构建描述符：声明的 `<name>` 成为软件包标识，清单所在目录
/// 成为软件包路径，分类则立即从 `CMakeLists.txt` 计算。
fn materialize(manifest_path: &Path) -> Result<Package> {
    let xml = fs::read_to_string(manifest_path)
        .with_context(|| format!("Failed to read manifest: {}", manifest_path.display()))?;
    let name = parse_package_name(&xml)
        .with_context(|| format!("Malformed manifest: {}", manifest_path.display()))?;

    let dir = manifest_path
        .parent()
        .with_context(|| format!("Manifest has no parent directory: {}", manifest_path.display()))?
        .to_path_buf();

    let cmake_path = dir.join(CMAKE_LISTS);
    let cmake_text = fs::read_to_string(&cmake_path).with_context(|| {
        format!(
            "Failed to read build configuration: {}",
            cmake_path.display()
        )
    })?;

    Ok(Package::new(
        name,
        dir,
        cmake::is_metapackage(&cmake_text),
        cmake::has_tests(&cmake_text),
    ))
}

/// Extracts the declared package name from manifest XML. The first `<name>`
/// element wins; a manifest without one is malformed.
///
/// 从清单 XML 中提取声明的软件包名称。第一个 `<name>` 元素生效；
/// 没有该元素的清单视为格式错误。
pub fn parse_package_name(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"name" => {
                let text = reader.read_text(e.name())?;
                let name = text.trim();
                if name.is_empty() {
                    bail!("Empty <name> element in package manifest");
                }
                return Ok(name.to_string());
            }
            Event::Eof => bail!("No <name> element in package manifest"),
            _ => {}
        }
    }
}
