//! Lookup of compiled Hardhat artifacts.
//!
//! Hardhat writes one JSON file per contract to
//! `<artifacts>/<sourceName>/<ContractName>.json`, next to a `.dbg.json` file
//! and a shared `build-info/` directory. Only the contract files are read.

use {
    crate::errors::ResolutionError,
    alloy::{
        json_abi::JsonAbi,
        primitives::{Bytes, hex},
    },
    serde::Deserialize,
    std::{
        collections::BTreeMap,
        fs,
        io,
        path::{Path, PathBuf},
    },
};

const BUILD_INFO_DIR: &str = "build-info";

/// The parts of a compiled contract needed to deploy it.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    /// Creation bytecode, without constructor arguments.
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: String,
    source_name: String,
    abi: JsonAbi,
    // Kept as a string because unlinked bytecode contains placeholders that
    // are not valid hex.
    bytecode: String,
    #[serde(default)]
    link_references: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub struct Artifacts {
    dir: PathBuf,
}

impl Artifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Loads the artifact of the contract called `name`, either a bare
    /// contract name or `<sourceName>:<ContractName>`.
    pub fn load(&self, name: &str) -> Result<Artifact, ResolutionError> {
        let path = self.path(name)?;
        tracing::debug!(?path, "loading artifact");
        let json = fs::read(&path).map_err(|source| ResolutionError::Io {
            path: path.clone(),
            source,
        })?;
        parse(&path, &json)
    }

    /// Finds the artifact file of the contract called `name`.
    pub fn path(&self, name: &str) -> Result<PathBuf, ResolutionError> {
        if let Some((source_name, contract_name)) = name.rsplit_once(':') {
            let path = self
                .dir
                .join(source_name)
                .join(format!("{contract_name}.json"));
            if !path.is_file() {
                return Err(ResolutionError::NotFound(name.to_string()));
            }
            return Ok(path);
        }

        let file_name = format!("{name}.json");
        let mut candidates = Vec::new();
        match find(&self.dir, &file_name, &mut candidates) {
            Err(err) if err.kind() == io::ErrorKind::NotFound && !self.dir.exists() => {
                return Err(ResolutionError::NotFound(name.to_string()));
            }
            Err(source) => {
                return Err(ResolutionError::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
            Ok(()) => (),
        }
        candidates.sort();

        match candidates.len() {
            0 => Err(ResolutionError::NotFound(name.to_string())),
            1 => Ok(candidates.remove(0)),
            _ => Err(ResolutionError::Ambiguous {
                name: name.to_string(),
                candidates,
            }),
        }
    }
}

fn find(dir: &Path, file_name: &str, found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            if entry.file_name() != BUILD_INFO_DIR {
                find(&path, file_name, found)?;
            }
        } else if entry.file_name() == file_name {
            found.push(path);
        }
    }
    Ok(())
}

fn parse(path: &Path, json: &[u8]) -> Result<Artifact, ResolutionError> {
    let raw: RawArtifact =
        serde_json::from_slice(json).map_err(|source| ResolutionError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let libraries = raw
        .link_references
        .iter()
        .flat_map(|(source, libraries)| {
            libraries
                .keys()
                .map(move |library| format!("{source}:{library}"))
        })
        .collect::<Vec<_>>();
    if !libraries.is_empty() {
        return Err(ResolutionError::Unlinked {
            name: raw.contract_name,
            libraries,
        });
    }

    let bytecode = hex::decode(&raw.bytecode).map_err(|source| ResolutionError::Bytecode {
        path: path.to_path_buf(),
        source,
    })?;
    if bytecode.is_empty() {
        return Err(ResolutionError::NotDeployable(raw.contract_name));
    }

    Ok(Artifact {
        contract_name: raw.contract_name,
        source_name: raw.source_name,
        abi: raw.abi,
        bytecode: bytecode.into(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use {super::*, tempfile::TempDir};

    pub const SIX_ELEMENTS_ABI: &str = r#"[
        {
            "inputs": [{"internalType": "address", "name": "proxyRegistryAddress", "type": "address"}],
            "stateMutability": "nonpayable",
            "type": "constructor"
        }
    ]"#;

    pub fn artifact_json(name: &str, source: &str, bytecode: &str) -> String {
        format!(
            r#"{{
                "_format": "hh-sol-artifact-1",
                "contractName": "{name}",
                "sourceName": "{source}",
                "abi": {SIX_ELEMENTS_ABI},
                "bytecode": "{bytecode}",
                "deployedBytecode": "0x",
                "linkReferences": {{}},
                "deployedLinkReferences": {{}}
            }}"#
        )
    }

    fn write(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn hardhat_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/SixElements.sol/SixElements.json",
            &artifact_json("SixElements", "contracts/SixElements.sol", "0x6080"),
        );
        write(
            dir.path(),
            "contracts/SixElements.sol/SixElements.dbg.json",
            r#"{"_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/abc.json"}"#,
        );
        write(dir.path(), "build-info/SixElements.json", "{}");
        dir
    }

    #[test]
    fn loads_by_bare_name() {
        let dir = hardhat_dir();
        let artifact = Artifacts::new(dir.path()).load("SixElements").unwrap();

        assert_eq!(artifact.contract_name, "SixElements");
        assert_eq!(artifact.source_name, "contracts/SixElements.sol");
        assert_eq!(artifact.bytecode, Bytes::from(vec![0x60, 0x80]));
        assert_eq!(artifact.abi.constructor().unwrap().inputs.len(), 1);
    }

    #[test]
    fn loads_by_fully_qualified_name() {
        let dir = hardhat_dir();
        let artifacts = Artifacts::new(dir.path());

        let path = artifacts
            .path("contracts/SixElements.sol:SixElements")
            .unwrap();
        assert_eq!(
            path,
            dir.path().join("contracts/SixElements.sol/SixElements.json")
        );
        assert!(matches!(
            artifacts.path("contracts/Other.sol:SixElements"),
            Err(ResolutionError::NotFound(_))
        ));
    }

    #[test]
    fn unknown_contract_is_not_found() {
        let dir = hardhat_dir();
        let result = Artifacts::new(dir.path()).load("FiveElements");
        assert!(matches!(result, Err(ResolutionError::NotFound(name)) if name == "FiveElements"));
    }

    #[test]
    fn missing_artifacts_dir_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = Artifacts::new(dir.path().join("artifacts")).load("SixElements");
        assert!(matches!(result, Err(ResolutionError::NotFound(_))));
    }

    #[test]
    fn same_name_in_two_sources_is_ambiguous() {
        let dir = hardhat_dir();
        write(
            dir.path(),
            "contracts/legacy/SixElements.sol/SixElements.json",
            &artifact_json("SixElements", "contracts/legacy/SixElements.sol", "0x6080"),
        );

        match Artifacts::new(dir.path()).path("SixElements") {
            Err(ResolutionError::Ambiguous { candidates, .. }) => assert_eq!(candidates.len(), 2),
            other => panic!("expected ambiguous lookup, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unlinked_bytecode() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{
            "contractName": "Linked",
            "sourceName": "contracts/Linked.sol",
            "abi": [],
            "bytecode": "0x6080__$b3a1a8f8f6c9c1c3$__6040",
            "linkReferences": {"contracts/Math.sol": {"Math": [{"length": 20, "start": 2}]}}
        }"#;
        write(dir.path(), "contracts/Linked.sol/Linked.json", json);

        match Artifacts::new(dir.path()).load("Linked") {
            Err(ResolutionError::Unlinked { libraries, .. }) => {
                assert_eq!(libraries, ["contracts/Math.sol:Math"])
            }
            other => panic!("expected unlinked error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_interfaces() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contracts/IElements.sol/IElements.json",
            &artifact_json("IElements", "contracts/IElements.sol", "0x"),
        );

        let result = Artifacts::new(dir.path()).load("IElements");
        assert!(matches!(result, Err(ResolutionError::NotDeployable(_))));
    }

    #[test]
    fn reports_malformed_json_with_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "contracts/Broken.sol/Broken.json", "{");

        match Artifacts::new(dir.path()).load("Broken") {
            Err(ResolutionError::Parse { path, .. }) => {
                assert!(path.ends_with("Broken.sol/Broken.json"))
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
