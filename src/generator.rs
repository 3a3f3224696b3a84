//! Generation run orchestration.
//!
//! [`BindingsGenerator`] owns one populated API and turns it into files:
//!
//! ```text
//! initialize:        ClassDb + DocDatabase --populate--> PopulatedApi
//! generate_sources:  PopulatedApi --order--> class order --emit--> files --write--> disk
//! ```
//!
//! A generator is tied to the thread that created it (`!Send`, `!Sync`);
//! embedders drive it from the thread that owns the scripting runtime.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, info, info_span, warn};

use julia_bindgen_registry::DependencyAnalyzer;

use crate::config::GeneratorConfig;
use crate::emit::{EmitStats, SourceEmitter, StringNames};
use crate::error::{GenerateError, GenerateResult};
use crate::host::{ClassDb, DocDatabase};
use crate::populate::{MetadataPopulator, PopulatedApi};

pub const CORE_CONSTANTS_FILE: &str = "core_constants.jl";
pub const CONSTANTS_FILE: &str = "constants.jl";
pub const STRING_NAMES_FILE: &str = "string_names.jl";
pub const MANIFEST_FILE: &str = "classes.jl";

/// A rendered file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    fn new(path: impl Into<PathBuf>, contents: impl ToString) -> Self {
        Self {
            path: path.into(),
            contents: contents.to_string(),
        }
    }
}

/// Outcome of a generation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Classes that got a file.
    pub types_emitted: usize,
    pub methods_emitted: usize,
    /// Members dropped while populating or emitting.
    pub members_skipped: usize,
    pub files_written: usize,
}

/// Generates the Julia sources for one host.
#[derive(Debug)]
pub struct BindingsGenerator {
    config: GeneratorConfig,
    api: Option<PopulatedApi>,
    _not_send: PhantomData<Rc<()>>,
}

impl BindingsGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            api: None,
            _not_send: PhantomData,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Read the host class database. Replaces any earlier population.
    pub fn initialize(&mut self, db: &dyn ClassDb, docs: &dyn DocDatabase) {
        let api = MetadataPopulator::new(db, docs, &self.config).populate();
        self.api = Some(api);
    }

    pub fn is_initialized(&self) -> bool {
        self.api.is_some()
    }

    pub fn api(&self) -> Option<&PopulatedApi> {
        self.api.as_ref()
    }

    /// Render every file in memory.
    ///
    /// `files_written` of the returned summary is always zero.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn render(&self) -> GenerateResult<(Vec<GeneratedFile>, GenerationSummary)> {
        let api = self.api.as_ref().ok_or(GenerateError::Unconfigured)?;

        let order = {
            let _span = info_span!("order").entered();
            let (order, cycles) = DependencyAnalyzer::new(&api.registry).order(api.registry.classes());
            debug!(classes = order.len(), cycles = cycles.len(), "ordered classes");
            order
        };

        let _span = info_span!("emit").entered();
        let emitter = SourceEmitter::new(api, &self.config);
        let mut stats = EmitStats::default();
        let mut names = StringNames::new();
        let mut class_files = Vec::new();
        let mut emitted = Vec::new();

        for class in emitter.emitted_classes(&order) {
            match emitter.class_source(class, &mut stats) {
                Ok(source) => {
                    names.extend(source.interned_names());
                    class_files.push(GeneratedFile::new(
                        Path::new(&self.config.classes_dir).join(source.file_name()),
                        &source,
                    ));
                    emitted.push(class);
                }
                Err(err) => {
                    warn!(class = %class.name, "{err}");
                    stats.members_skipped += 1;
                }
            }
        }

        let mut files = vec![
            GeneratedFile::new(CORE_CONSTANTS_FILE, emitter.core_constants()),
            GeneratedFile::new(CONSTANTS_FILE, emitter.global_constants()),
            GeneratedFile::new(STRING_NAMES_FILE, &names),
        ];
        files.append(&mut class_files);
        files.push(GeneratedFile::new(MANIFEST_FILE, emitter.manifest(&emitted)));

        let summary = GenerationSummary {
            types_emitted: emitted.len(),
            methods_emitted: stats.methods_emitted,
            members_skipped: api.skipped + stats.members_skipped,
            files_written: 0,
        };
        debug!(
            types = summary.types_emitted,
            methods = summary.methods_emitted,
            names = names.len(),
            "rendered sources"
        );
        Ok((files, summary))
    }

    /// Render and write every file below `dir`.
    ///
    /// Any file system error aborts the run.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate_sources(&self, dir: impl AsRef<Path>) -> GenerateResult<GenerationSummary> {
        let dir = dir.as_ref();
        let (files, mut summary) = self.render()?;

        let _span = info_span!("write", path = %dir.display()).entered();
        let classes_dir = dir.join(&self.config.classes_dir);
        fs::create_dir_all(&classes_dir).map_err(|source| GenerateError::CreateDir {
            path: classes_dir.clone(),
            source,
        })?;

        for file in &files {
            let path = dir.join(&file.path);
            fs::write(&path, &file.contents).map_err(|source| GenerateError::WriteFile {
                path: path.clone(),
                source,
            })?;
            summary.files_written += 1;
        }

        info!(
            package = %self.config.package_name,
            types = summary.types_emitted,
            methods = summary.methods_emitted,
            skipped = summary.members_skipped,
            files = summary.files_written,
            "the Julia package was successfully generated"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::host::{JsonClassDb, NoDocs};

    fn db() -> JsonClassDb {
        JsonClassDb::from_value(json!({
            "classes": [
                { "name": "Object" },
                { "name": "Node", "parent": "Object",
                  "methods": [ { "name": "get_name", "return": { "type": "string_name" } } ] }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn refuses_to_render_before_initialization() {
        let generator = BindingsGenerator::new(GeneratorConfig::default());
        assert!(!generator.is_initialized());
        assert!(matches!(generator.render(), Err(GenerateError::Unconfigured)));
    }

    #[test]
    fn render_produces_every_file() {
        let mut generator = BindingsGenerator::new(GeneratorConfig::default());
        generator.initialize(&db(), &NoDocs);

        let (files, summary) = generator.render().unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("core_constants.jl"),
                PathBuf::from("constants.jl"),
                PathBuf::from("string_names.jl"),
                Path::new("classes").join("Object.jl"),
                Path::new("classes").join("Node.jl"),
                PathBuf::from("classes.jl"),
            ]
        );
        assert_eq!(summary.types_emitted, 2);
        assert_eq!(summary.methods_emitted, 1);
        assert_eq!(summary.files_written, 0);

        let names = &files[2].contents;
        assert!(names.contains("\t_Node::StringName\n"));
        assert!(names.contains("\t_get_name::StringName\n"));
    }
}
