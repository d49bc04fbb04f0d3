use std::path::PathBuf;

pub struct Config {
    /// Output verbosity. `0` prints everything, `1` drops decoration, `2` prints only the summary.
    pub quiet: u8,
    pub no_banner: bool,
    pub query: QueryCapabilities,
    pub output: OutputSettings,
}

/// What the node query engine can do natively.
///
/// Determined once when the pipeline is assembled and passed down, never
/// looked up per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryCapabilities {
    /// Whether `tag[@key='value']` style lookups can be delegated to the tree.
    pub attribute_predicates: bool,
}

impl QueryCapabilities {
    /// Capabilities of the built-in element tree. Its predicate lookup is a
    /// linear pass over the children, the same cost as the fallback scan.
    pub fn detect() -> Self {
        Self {
            attribute_predicates: true,
        }
    }

    /// Forces every predicate lookup through the manual sibling scan.
    pub fn fallback() -> Self {
        Self {
            attribute_predicates: false,
        }
    }
}

impl Default for QueryCapabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// Where tool adapters ask their tools to write reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub data_dir: PathBuf,
    /// Per-run identifier embedded in generated report file names.
    pub run_id: u32,
}

impl OutputSettings {
    pub fn new(data_dir: impl Into<PathBuf>, run_id: u32) -> Self {
        Self {
            data_dir: data_dir.into(),
            run_id,
        }
    }

    /// Path of the report file for the tool `prefix`, e.g. `dnsenum_output-42.xml`.
    pub fn report_path(&self, prefix: &str, extension: &str) -> PathBuf {
        self.data_dir
            .join(format!("{prefix}_output-{}.{extension}", self.run_id))
    }
}
