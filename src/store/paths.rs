use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
pub enum PathError {
    /// The path tried to ascend above the served root.
    Traversal,
}

/// Static request-path → resource-path redirections, loaded once per server
/// instance from a `key=value`-per-line file and read-only thereafter.
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Parses `key=value` lines. Blank lines and `#` comments are skipped;
    /// lines without '=' are ignored.
    pub fn parse(text: &str) -> Self {
        let mut map = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                map.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { map }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.map.get(path).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Turns a raw request path into a store lookup key: traversal check, then
/// the default-document rule, then alias substitution.
pub struct PathResolver {
    aliases: AliasTable,
}

impl PathResolver {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn resolve(&self, raw: &str) -> Result<String, PathError> {
        validate_depth(raw)?;

        let path = if raw == "/" { "/index.html" } else { raw };

        Ok(match self.aliases.get(path) {
            Some(target) => target.to_string(),
            None => path.to_string(),
        })
    }
}

/// Walks the path segments keeping a depth counter: ".." descends, anything
/// else (empty segments included) advances. Going negative at any point
/// means the path escaped the root, whatever "." games or repeated slashes
/// surround it.
fn validate_depth(path: &str) -> Result<(), PathError> {
    let mut depth: i32 = 0;
    for segment in path.split('/') {
        if segment == ".." {
            depth -= 1;
        } else {
            depth += 1;
        }
        if depth < 0 {
            return Err(PathError::Traversal);
        }
    }
    Ok(())
}
