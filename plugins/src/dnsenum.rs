//! # dnsenum
//!
//! dnsenum writes its XML report (`-o <file>`) as a `magictree` document:
//!
//! ```xml
//! <magictree class="MtBranchObject">
//!   <testdata class="MtBranchObject">
//!     <host>10.0.0.1<hostname>a.example.com</hostname></host>
//!   </testdata>
//! </magictree>
//! ```
//!
//! Each `host` entry carries the address as its own text and, optionally,
//! the name it was found under.

use std::path::{Path, PathBuf};

use ingestr_common::config::{OutputSettings, QueryCapabilities};
use ingestr_core::parser::{ExtractionSchema, HostnameSource, OutputParser, XmlRecordParser};
use ingestr_core::xml::{NodeQuery, QueryEngine};
use regex::Regex;

use crate::ToolPlugin;
use crate::command::OutputFlagRewriter;

const ID: &str = "Dnsenum";
const NAME: &str = "Dnsenum XML Output Plugin";
const PLUGIN_VERSION: &str = "0.0.1";
const TOOL_VERSION: &str = "1.2.2";

const COMMAND_PATTERN: &str =
    r"^(sudo dnsenum|dnsenum|sudo dnsenum\.pl|dnsenum\.pl|perl dnsenum\.pl|\./dnsenum\.pl)";
const INVOCATION_PATTERN: &str = r"^.*?dnsenum(\.pl)?";

pub const SCHEMA: ExtractionSchema = ExtractionSchema {
    container: "testdata",
    entry: "host",
    hostname: HostnameSource::Text(NodeQuery::Child("hostname")),
};

pub struct DnsenumPlugin {
    command: Regex,
    rewriter: OutputFlagRewriter,
    output_path: PathBuf,
    parser: XmlRecordParser,
}

impl DnsenumPlugin {
    pub fn new(settings: &OutputSettings, capabilities: QueryCapabilities) -> anyhow::Result<Self> {
        Ok(Self {
            command: Regex::new(COMMAND_PATTERN)?,
            rewriter: OutputFlagRewriter::new(INVOCATION_PATTERN, "-o")?,
            output_path: settings.report_path("dnsenum", "xml"),
            parser: XmlRecordParser::new("dnsenum", SCHEMA, QueryEngine::new(capabilities)),
        })
    }
}

impl ToolPlugin for DnsenumPlugin {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        NAME
    }

    fn plugin_version(&self) -> &str {
        PLUGIN_VERSION
    }

    fn tool_version(&self) -> &str {
        TOOL_VERSION
    }

    fn matches_command(&self, command: &str) -> bool {
        self.command.is_match(command.trim_start())
    }

    fn rewrite_command(&self, command: &str) -> String {
        self.rewriter.rewrite(command, &self.output_path)
    }

    fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn parser(&self) -> &dyn OutputParser {
        &self.parser
    }
}
