//! Built-in C++ feature catalog.
//!
//! [`builtin_registry`] is the single entry-point for the features that ship
//! with Splint. The graph it registers:
//!
//! | category | mono | members              | defaults  | requires |
//! |----------|------|----------------------|-----------|----------|
//! | `build`  | yes  | make, ninja, xcode   | make      |          |
//! | `test`   | yes  | gtest, catch2        | gtest     | `build`  |
//! | `doc`    | no   | doxygen              | doxygen   |          |
//! | (sink)   |      | file, format -> file |           |          |
//!
//! Features never run external tools themselves. Their actions emit the
//! commands a project would run, through [`InvokeContext::emit`], and the
//! CLI decides what to do with them.

use std::any::Any;

use tracing::info;

use splint_core::{
    application::{ApplicationError, Feature, InvokeContext},
    domain::{CategoryDescriptor, DomainError, FeatureDescriptor, Registry},
    error::{SplintError, SplintResult},
};

pub const BUILD: &str = "build";
pub const TEST: &str = "test";
pub const DOC: &str = "doc";

/// Build configuration used by every action.
const CONFIG: &str = "debug";

// ── Public API ────────────────────────────────────────────────────────────────

/// Registry holding the whole built-in catalog.
///
/// Fails only if the catalog itself is inconsistent, which the tests below
/// rule out.
pub fn builtin_registry() -> Result<Registry, DomainError> {
    let mut registry = Registry::new();

    for generator in Generator::ALL {
        registry.register_feature(FeatureDescriptor::new(generator.feature_name(), move || {
            Box::new(CmakeBuild::new(generator))
        }))?;
    }
    registry.register_category(
        CategoryDescriptor::builder(BUILD)
            .members(Generator::ALL.map(|g| g.feature_name()))
            .defaults([Generator::Make.feature_name()])
            .build(),
    )?;

    for framework in TestFramework::ALL {
        registry.register_feature(FeatureDescriptor::new(framework.feature_name(), move || {
            Box::new(TestRunner::new(framework))
        }))?;
    }
    registry.register_category(
        CategoryDescriptor::builder(TEST)
            .members(TestFramework::ALL.map(|f| f.feature_name()))
            .defaults([TestFramework::GTest.feature_name()])
            .requires([BUILD])
            .build(),
    )?;

    registry.register_feature(FeatureDescriptor::new("doxygen", || Box::new(Doxygen)))?;
    registry.register_category(
        CategoryDescriptor::builder(DOC)
            .members(["doxygen"])
            .defaults(["doxygen"])
            .mono(false)
            .build(),
    )?;

    registry.register_feature(FeatureDescriptor::new("file", || Box::new(SourceLayout)))?;
    registry.register_feature(
        FeatureDescriptor::new("format", || Box::new(ClangFormat)).requires(["file"]),
    )?;

    Ok(registry)
}

/// One-line description of a built-in feature or category.
pub fn describe(name: &str) -> Option<&'static str> {
    let text = match name {
        BUILD => "Build system generator driven by CMake",
        TEST => "Unit test framework",
        DOC => "Documentation generators",
        "make" => "CMake with Unix Makefiles",
        "ninja" => "CMake with Ninja",
        "xcode" => "CMake with Xcode",
        "gtest" => "GoogleTest suites",
        "catch2" => "Catch2 suites",
        "doxygen" => "API docs generated by Doxygen",
        "file" => "Standard source layout (include/, src/, test/)",
        "format" => "clang-format over the source layout",
        _ => return None,
    };
    Some(text)
}

// ── Build ─────────────────────────────────────────────────────────────────────

/// CMake generator behind a `build` member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Make,
    Ninja,
    Xcode,
}

impl Generator {
    pub const ALL: [Self; 3] = [Self::Make, Self::Ninja, Self::Xcode];

    pub const fn feature_name(self) -> &'static str {
        match self {
            Self::Make => "make",
            Self::Ninja => "ninja",
            Self::Xcode => "xcode",
        }
    }

    /// Name CMake knows the generator by.
    pub const fn cmake_name(self) -> &'static str {
        match self {
            Self::Make => "Unix Makefiles",
            Self::Ninja => "Ninja",
            Self::Xcode => "Xcode",
        }
    }

    /// Multi-config generators share one build directory for all configs.
    pub const fn is_multi_config(self) -> bool {
        matches!(self, Self::Xcode)
    }
}

/// A `build` member: configures and builds through CMake.
#[derive(Debug, Clone, Copy)]
pub struct CmakeBuild {
    generator: Generator,
}

impl CmakeBuild {
    pub fn new(generator: Generator) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> Generator {
        self.generator
    }

    /// Build directory, relative to the project root.
    pub fn build_directory(&self) -> String {
        if self.generator.is_multi_config() {
            "_build".to_string()
        } else {
            format!("_build/{CONFIG}")
        }
    }

    fn configure_command(&self) -> String {
        format!(
            "cmake -S . -B {} -G \"{}\" -DCMAKE_BUILD_TYPE={}",
            self.build_directory(),
            self.generator.cmake_name(),
            capitalize(CONFIG)
        )
    }

    fn build_command(&self, target: Option<&str>) -> String {
        let mut command = format!(
            "cmake --build {} --config {}",
            self.build_directory(),
            capitalize(CONFIG)
        );
        if let Some(target) = target {
            command.push_str(" --target ");
            command.push_str(target);
        }
        command
    }
}

impl Feature for CmakeBuild {
    fn set_up(&mut self) -> SplintResult<()> {
        info!(generator = self.generator.cmake_name(), "Build configured");
        Ok(())
    }

    fn handle(&self, ctx: &InvokeContext<'_>) -> SplintResult<()> {
        match ctx.action() {
            None | Some("build") => ctx.emit(self.build_command(None)),
            Some("configure") => ctx.emit(self.configure_command()),
            Some("clean") => ctx.emit(self.build_command(Some("clean"))),
            Some(other) => return Err(unknown_action(self.generator.feature_name(), other)),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ── Test ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestFramework {
    GTest,
    Catch2,
}

impl TestFramework {
    pub const ALL: [Self; 2] = [Self::GTest, Self::Catch2];

    pub const fn feature_name(self) -> &'static str {
        match self {
            Self::GTest => "gtest",
            Self::Catch2 => "catch2",
        }
    }
}

/// A `test` member. Builds and runs the test target of whichever build
/// feature is active.
#[derive(Debug, Clone, Copy)]
pub struct TestRunner {
    framework: TestFramework,
}

impl TestRunner {
    pub fn new(framework: TestFramework) -> Self {
        Self { framework }
    }

    fn target(&self) -> String {
        format!("{}_tests", self.framework.feature_name())
    }
}

impl Feature for TestRunner {
    fn handle(&self, ctx: &InvokeContext<'_>) -> SplintResult<()> {
        let build = active_build(ctx)?;
        let target = self.target();

        match ctx.action() {
            None | Some("run") => {
                ctx.emit(build.build_command(Some(&target)));
                ctx.emit(format!(
                    "ctest --test-dir {} --output-on-failure",
                    build.build_directory()
                ));
            }
            Some("build") => ctx.emit(build.build_command(Some(&target))),
            Some(other) => return Err(unknown_action(self.framework.feature_name(), other)),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The single active `build` member.
fn active_build<'a>(ctx: &InvokeContext<'a>) -> SplintResult<&'a CmakeBuild> {
    ctx.engine()
        .get_singular_active_feature(BUILD)?
        .as_any()
        .downcast_ref::<CmakeBuild>()
        .ok_or_else(|| SplintError::Internal {
            message: "active build feature is not a CMake build".into(),
        })
}

// ── Docs and sources ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Doxygen;

impl Feature for Doxygen {
    fn set_up(&mut self) -> SplintResult<()> {
        info!("Doxyfile template requested");
        Ok(())
    }

    fn handle(&self, ctx: &InvokeContext<'_>) -> SplintResult<()> {
        match ctx.action() {
            None | Some("generate") => ctx.emit("doxygen doc/Doxyfile"),
            Some("init") => ctx.emit("doxygen -g doc/Doxyfile"),
            Some(other) => return Err(unknown_action("doxygen", other)),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Directories every project gets.
const SOURCE_DIRS: [&str; 3] = ["include", "src", "test"];

#[derive(Debug, Clone, Copy)]
pub struct SourceLayout;

impl Feature for SourceLayout {
    fn handle(&self, ctx: &InvokeContext<'_>) -> SplintResult<()> {
        match ctx.action() {
            None | Some("list") => {
                for dir in SOURCE_DIRS {
                    ctx.emit(format!("{dir}/"));
                }
            }
            Some(other) => return Err(unknown_action("file", other)),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClangFormat;

impl Feature for ClangFormat {
    fn handle(&self, ctx: &InvokeContext<'_>) -> SplintResult<()> {
        match ctx.action() {
            None | Some("fix") => ctx.emit("clang-format -i include/**/*.h src/**/*.cpp"),
            Some("check") => {
                ctx.emit("clang-format --dry-run --Werror include/**/*.h src/**/*.cpp")
            }
            Some(other) => return Err(unknown_action("format", other)),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn unknown_action(name: &str, action: &str) -> SplintError {
    ApplicationError::UnknownAction {
        name: name.to_string(),
        action: action.to_string(),
    }
    .into()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
