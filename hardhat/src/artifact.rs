use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use serde_json::{
    ser::{Formatter, PrettyFormatter},
    Map, Serializer, Value,
};

/// Artifact schema version tag written into `_format`.
pub const ARTIFACT_FORMAT: &str = "hh-sol-artifact-1";

/// Placeholder bytecode, no bytecode is produced by an abi only compilation.
pub const EMPTY_BYTECODE: &str = "0x";

/// Pretty formatter writing non-ASCII characters as `\uXXXX` escapes.
struct AsciiFormatter<'a>(PrettyFormatter<'a>);

impl<'a> AsciiFormatter<'a> {
    fn new() -> Self {
        Self(PrettyFormatter::with_indent(b"    "))
    }
}

impl<'a> Formatter for AsciiFormatter<'a> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];

        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }

        Ok(())
    }
}

/// Hardhat artifact document wrapping a solc generated abi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardhatArtifact {
    #[serde(rename = "_format")]
    pub format: String,
    pub contract_name: String,
    pub source_name: String,
    pub abi: Vec<Value>,
    pub bytecode: String,
    pub deployed_bytecode: String,
    pub link_references: Map<String, Value>,
    pub deployed_link_references: Map<String, Value>,
}

impl HardhatArtifact {
    /// Create artifact for `contract_name` declared in `source_name` with empty bytecode.
    pub fn new<N, S>(contract_name: N, source_name: S, abi: Vec<Value>) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        Self {
            format: ARTIFACT_FORMAT.to_owned(),
            contract_name: contract_name.into(),
            source_name: source_name.into(),
            abi,
            bytecode: EMPTY_BYTECODE.to_owned(),
            deployed_bytecode: EMPTY_BYTECODE.to_owned(),
            link_references: Map::new(),
            deployed_link_references: Map::new(),
        }
    }

    /// Loads artifact from json.
    pub fn load<T: io::Read>(reader: T) -> anyhow::Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write artifact as ASCII json indented by 4 spaces.
    pub fn save<W: io::Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut serializer = Serializer::with_formatter(writer, AsciiFormatter::new());

        self.serialize(&mut serializer)?;

        Ok(())
    }

    /// Returns the indented json text of this artifact.
    pub fn to_json_string(&self) -> anyhow::Result<String> {
        let mut buf = vec![];

        self.save(&mut buf)?;

        Ok(String::from_utf8(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_artifact_layout() {
        let abi = vec![json!({
            "type": "function",
            "name": "transfer",
            "inputs": [],
            "outputs": [],
            "stateMutability": "nonpayable"
        })];

        let artifact = HardhatArtifact::new("Foo", "contracts/Foo.sol", abi);

        let expected = r#"{
    "_format": "hh-sol-artifact-1",
    "contractName": "Foo",
    "sourceName": "contracts/Foo.sol",
    "abi": [
        {
            "type": "function",
            "name": "transfer",
            "inputs": [],
            "outputs": [],
            "stateMutability": "nonpayable"
        }
    ],
    "bytecode": "0x",
    "deployedBytecode": "0x",
    "linkReferences": {},
    "deployedLinkReferences": {}
}"#;

        assert_eq!(artifact.to_json_string().expect("Serialize artifact"), expected);
    }

    #[test]
    fn test_load_saved_artifact() {
        let artifact = HardhatArtifact::new("Empty", "Empty.sol", vec![]);

        let json = artifact.to_json_string().expect("Serialize artifact");

        let loaded = HardhatArtifact::load(json.as_bytes()).expect("Load artifact");

        assert_eq!(loaded, artifact);
        assert_eq!(loaded.bytecode, "0x");
        assert_eq!(loaded.deployed_bytecode, "0x");
    }

    #[test]
    fn test_non_ascii_escaped() {
        let abi = vec![json!({"type": "error", "name": "Überlauf", "inputs": [], "notice": "\u{1F600}"})];

        let json = HardhatArtifact::new("Café", "Café.sol", abi)
            .to_json_string()
            .expect("Serialize artifact");

        assert!(json.is_ascii());
        assert!(json.contains(r#""contractName": "Caf\u00e9","#));
        assert!(json.contains(r#""name": "\u00dcberlauf","#));
        assert!(json.contains(r#""notice": "\ud83d\ude00""#));

        let loaded = HardhatArtifact::load(json.as_bytes()).expect("Load artifact");

        assert_eq!(loaded.contract_name, "Café");
        assert_eq!(loaded.abi[0]["notice"], json!("\u{1F600}"));
    }
}
