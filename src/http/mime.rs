use std::collections::HashMap;

/// Fallback when no extension matches.
const DEFAULT_TYPE: &str = "application/octet-stream";

/// Content type and content encoding tables, built once at server
/// construction and shared read-only across connections.
///
/// The server performs no compression of its own. A compression extension on
/// a file name only means the file is already stored compressed, so the
/// response reports the encoding alongside the underlying type.
pub struct ContentTypes {
    types: HashMap<&'static str, &'static str>,
    encodings: HashMap<&'static str, &'static str>,
    combos: HashMap<&'static str, (&'static str, &'static str)>,
}

impl ContentTypes {
    pub fn new() -> Self {
        let types = HashMap::from([
            ("html", "text/html"),
            ("htm", "text/html"),
            ("css", "text/css"),
            ("js", "text/javascript"),
            ("mjs", "text/javascript"),
            ("json", "application/json"),
            ("txt", "text/plain"),
            ("md", "text/plain"),
            ("xml", "application/xml"),
            ("pdf", "application/pdf"),
            ("png", "image/png"),
            ("jpg", "image/jpeg"),
            ("jpeg", "image/jpeg"),
            ("gif", "image/gif"),
            ("svg", "image/svg+xml"),
            ("ico", "image/x-icon"),
            ("webp", "image/webp"),
            ("woff", "font/woff"),
            ("woff2", "font/woff2"),
            ("ttf", "font/ttf"),
            ("otf", "font/otf"),
            ("wasm", "application/wasm"),
            ("mp3", "audio/mpeg"),
            ("mp4", "video/mp4"),
            ("webm", "video/webm"),
            ("tar", "application/x-tar"),
            ("zip", "application/zip"),
            ("jar", "application/java-archive"),
        ]);

        // Extensions that name a compression encoding rather than a type.
        // Lookups are case-sensitive: "Z" is compress, "z" is nothing.
        let encodings = HashMap::from([
            ("gz", "gzip"),
            ("Z", "compress"),
            ("bz2", "bzip2"),
            ("bzip2", "bzip2"),
            ("xz", "xz"),
            ("br", "br"),
        ]);

        // Combined pseudo-extensions: one token meaning base type + encoding.
        let combos = HashMap::from([
            ("svgz", ("svg", "gzip")),
            ("tgz", ("tar", "gzip")),
            ("taz", ("tar", "gzip")),
            ("tz", ("tar", "gzip")),
            ("tbz2", ("tar", "bzip2")),
            ("txz", ("tar", "xz")),
        ]);

        Self {
            types,
            encodings,
            combos,
        }
    }

    /// Maps a resource name to its MIME type and optional content encoding.
    ///
    /// The extension is everything after the last '.' of the basename.
    /// Leading dots are stripped first, so a bare dotfile like ".html" has
    /// no extension and falls back to the default type.
    pub fn resolve(&self, name: &str) -> (&'static str, Option<&'static str>) {
        let basename = name.rsplit('/').next().unwrap_or(name);
        let basename = basename.trim_start_matches('.');

        let (stem, ext) = match basename.rsplit_once('.') {
            Some(split) => split,
            None => return (DEFAULT_TYPE, None),
        };

        if let Some(&(base, encoding)) = self.combos.get(ext) {
            return (self.type_for(base), Some(encoding));
        }

        if let Some(&encoding) = self.encodings.get(ext) {
            // "x.tar.gz": the type comes from the extension under the
            // compression suffix. "x.gz" has no second extension and falls
            // through to a plain lookup of the raw extension.
            return match stem.rsplit_once('.') {
                Some((_, base)) => (self.type_for(base), Some(encoding)),
                None => (self.type_for(ext), None),
            };
        }

        (self.type_for(ext), None)
    }

    fn type_for(&self, ext: &str) -> &'static str {
        self.types.get(ext).copied().unwrap_or(DEFAULT_TYPE)
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}
