//! Target matrix: the declarative description of every document to produce,
//! and its enumeration into concrete [`Target`]s.
//!
//! Runtime-variant values live in exactly one [`RuntimeBundle`] per variant.
//! Targets copy them from the bundle and never restate them, and
//! [`ConsistencyChecker`] verifies that nothing drifted before rendering.

use crate::constants::PROFILES_VARIANT;
use crate::error::{Error, Result};
use crate::params::ParameterSet;
use crate::placeholder;
use crate::target::{DeploymentContext, FragmentSelection, Target, TargetId};
use log::debug;
use std::path::PathBuf;

/// Bundle parameter keys and the build-tool properties that carry them in
/// profile-driven documents.
pub const BUNDLE_PROPERTIES: [(&str, &str); 4] = [
    ("scala_version", "scala.version"),
    ("scala_binary_version", "scala.binary.version"),
    ("java_version", "maven.compiler.source"),
    ("spark_version", "spark.version"),
];

/// Project-wide values shared by every module.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub group_id: String,
    pub url: String,
    pub inception_year: String,
    pub version: String,
}

impl ProjectInfo {
    fn parameters(&self) -> ParameterSet {
        ParameterSet::new()
            .with("group_id", &self.group_id)
            .with("project_url", &self.url)
            .with("inception_year", &self.inception_year)
            .with("version", &self.version)
    }
}

/// The paired, version-dependent values of one supported runtime variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeBundle {
    /// Runtime binary version, e.g. `2.11`; also the variant id.
    pub binary_version: String,
    pub runtime_version: String,
    pub language_level: String,
    pub spark_version: String,
}

impl RuntimeBundle {
    pub fn id(&self) -> &str {
        &self.binary_version
    }

    /// Build profile id for this variant, e.g. `scala-2.11`.
    pub fn profile_id(&self) -> String {
        format!("scala-{}", self.binary_version)
    }

    /// Concrete bundle values, keyed like [`BUNDLE_PROPERTIES`].
    pub fn parameters(&self) -> ParameterSet {
        ParameterSet::new()
            .with("scala_version", &self.runtime_version)
            .with("scala_binary_version", &self.binary_version)
            .with("java_version", &self.language_level)
            .with("spark_version", &self.spark_version)
    }

    /// Property references standing in for the bundle in profile-driven documents.
    pub fn property_references() -> ParameterSet {
        BUNDLE_PROPERTIES
            .iter()
            .map(|(key, property)| (*key, format!("${{{property}}}")))
            .collect()
    }
}

/// One module and the fragments it contributes in every context.
#[derive(Debug, Clone)]
pub struct ModuleSpec {
    /// Module id and output directory, e.g. `core`.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Artifact id before the runtime suffix.
    pub artifact_base: String,
    pub selection: FragmentSelection,
}

/// How a deployment context shapes its targets.
#[derive(Debug, Clone)]
pub struct ContextSpec {
    pub context: DeploymentContext,
    /// One target per runtime variant, or a single profile-driven target.
    pub per_variant: bool,
    /// Output file name inside the module directory; may use placeholders.
    pub file_name: String,
    /// Appended after the module's own selection.
    pub selection: FragmentSelection,
}

/// Narrows enumeration to part of the matrix.
#[derive(Debug, Clone, Default)]
pub struct MatrixOptions {
    /// Module ids to keep; empty keeps all.
    pub modules: Vec<String>,
    /// Contexts to keep; empty keeps all.
    pub contexts: Vec<DeploymentContext>,
    /// Replaces the project version for this run.
    pub version: Option<String>,
}

/// Authored description of every module, variant and context.
#[derive(Debug, Clone)]
pub struct MatrixSpec {
    pub project: ProjectInfo,
    pub bundles: Vec<RuntimeBundle>,
    /// Companion versions shared by all variants.
    pub companions: ParameterSet,
    pub modules: Vec<ModuleSpec>,
    pub contexts: Vec<ContextSpec>,
}

/// Enumerated targets plus the authored values they were built from.
#[derive(Debug, Clone)]
pub struct TargetMatrix {
    pub targets: Vec<Target>,
    pub bundles: Vec<RuntimeBundle>,
    /// Project version every target must carry, after any override.
    pub version: String,
}

impl MatrixSpec {
    /// Enumerates every target selected by `options`, in module then context order.
    ///
    /// # Errors
    /// * `Error::ConfigError` if `options` names an unknown module
    /// * `Error::UnresolvedPlaceholderError` if an output file name uses an unknown key
    pub fn enumerate(&self, options: &MatrixOptions) -> Result<TargetMatrix> {
        if let Some(unknown) =
            options.modules.iter().find(|m| !self.modules.iter().any(|spec| &spec.id == *m))
        {
            let known: Vec<&str> = self.modules.iter().map(|m| m.id.as_str()).collect();
            return Err(Error::ConfigError(format!(
                "unknown module '{}' (known: {})",
                unknown,
                known.join(", ")
            )));
        }

        let mut project = self.project.clone();
        if let Some(version) = &options.version {
            project.version = version.clone();
        }
        let shared = project.parameters();

        let mut targets = Vec::new();
        for module in &self.modules {
            if !options.modules.is_empty() && !options.modules.contains(&module.id) {
                continue;
            }
            for context in &self.contexts {
                if !options.contexts.is_empty() && !options.contexts.contains(&context.context) {
                    continue;
                }
                if context.per_variant {
                    for bundle in &self.bundles {
                        targets.push(self.target(
                            &shared,
                            module,
                            context,
                            bundle.id(),
                            &bundle.parameters(),
                        )?);
                    }
                } else {
                    targets.push(self.target(
                        &shared,
                        module,
                        context,
                        PROFILES_VARIANT,
                        &RuntimeBundle::property_references(),
                    )?);
                }
            }
        }

        debug!("Enumerated {} targets", targets.len());
        Ok(TargetMatrix {
            targets,
            bundles: self.bundles.clone(),
            version: project.version,
        })
    }

    fn target(
        &self,
        shared: &ParameterSet,
        module: &ModuleSpec,
        context: &ContextSpec,
        variant: &str,
        bundle: &ParameterSet,
    ) -> Result<Target> {
        let id = TargetId {
            module: module.id.clone(),
            variant: variant.to_string(),
            context: context.context,
        };

        let mut parameters = shared.clone();
        parameters.extend(&self.companions);
        parameters.extend(bundle);
        parameters
            .set("name", &module.name)
            .set("description", &module.description)
            .set("variant", variant);
        let suffix = bundle.get("scala_binary_version").unwrap_or(variant).to_string();
        parameters.set("artifact_id", format!("{}_{}", module.artifact_base, suffix));

        let file_name = placeholder::substitute(&context.file_name, |key| parameters.get(key))
            .map_err(|missing| Error::UnresolvedPlaceholderError {
                target: id.to_string(),
                placeholder: missing,
                origin: "output file name".to_string(),
            })?;

        let mut selection = module.selection.clone();
        for slot in context.selection.slots() {
            selection.fill(slot, context.selection.get(slot).unwrap_or_default().iter().cloned());
        }

        Ok(Target {
            output_path: PathBuf::from(&module.id).join(file_name),
            id,
            selection,
            parameters,
        })
    }
}

impl TargetMatrix {
    pub fn checker(&self) -> ConsistencyChecker<'_> {
        ConsistencyChecker::new(&self.bundles, &self.version)
    }
}

/// Verifies the cross-target invariants one target at a time.
///
/// Every target must carry the authored project version, and a target bound
/// to a runtime variant must carry exactly that variant's bundle values.
#[derive(Debug)]
pub struct ConsistencyChecker<'a> {
    bundles: &'a [RuntimeBundle],
    version: &'a str,
}

impl<'a> ConsistencyChecker<'a> {
    pub fn new(bundles: &'a [RuntimeBundle], version: &'a str) -> Self {
        Self { bundles, version }
    }

    /// Checks `target` against the authored version and bundles.
    ///
    /// # Errors
    /// * `Error::InconsistentParameterError` naming the drifting key
    pub fn check(&self, target: &Target) -> Result<()> {
        let label = target.id.to_string();
        let params = &target.parameters;

        let version = params.get("version").ok_or_else(|| Error::UnresolvedPlaceholderError {
            target: label.clone(),
            placeholder: "version".to_string(),
            origin: "parameter set".to_string(),
        })?;
        if version != self.version {
            return Err(inconsistent(&label, "version", self.version, version));
        }

        let bundle = if target.id.variant == PROFILES_VARIANT {
            RuntimeBundle::property_references()
        } else {
            match self.bundles.iter().find(|b| b.id() == target.id.variant) {
                Some(bundle) => bundle.parameters(),
                None => {
                    let known: Vec<&str> = self.bundles.iter().map(RuntimeBundle::id).collect();
                    return Err(inconsistent(
                        &label,
                        "variant",
                        &known.join(" | "),
                        &target.id.variant,
                    ));
                }
            }
        };

        for (key, expected) in bundle.iter() {
            let found = params.get(key).unwrap_or_default();
            if found != expected {
                return Err(inconsistent(&label, key, expected, found));
            }
        }
        Ok(())
    }
}

fn inconsistent(target: &str, key: &str, expected: &str, found: &str) -> Error {
    Error::InconsistentParameterError {
        target: target.to_string(),
        key: key.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}
