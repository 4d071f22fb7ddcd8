// Copyright (c) 2026 Billbook. All Rights Reserved.

extern crate chrono;
#[macro_use]
extern crate error_chain;
extern crate futures;
extern crate hyper;
extern crate hyper_tls;
#[macro_use]
extern crate lazy_static;
extern crate printpdf;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;
extern crate tokio;
#[macro_use]
extern crate tracing;
extern crate url;
extern crate validator;

#[cfg(test)]
extern crate tempfile;

mod bb;

// Publicly re-export:
pub use bb::api::Billbook;
pub use bb::config::{Config, Environment};
pub use bb::error::{Error, ErrorKind, ResultExt};
pub use bb::types::{Future, Result};
pub use bb::util::block_on;
pub use bb::{api, error, format, model, session, storage, util, validation};

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    const HEADER: &str = "// Copyright (c) 2026 Billbook. All Rights Reserved.";

    fn rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                rust_files(&path, out);
            } else if path.extension().map_or(false, |ext| ext == "rs") {
                out.push(path);
            }
        }
    }

    #[test]
    fn every_source_file_starts_with_the_copyright_header() {
        let mut files = Vec::new();
        rust_files(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut files);
        assert!(!files.is_empty());
        for file in files {
            let text = fs::read_to_string(&file).unwrap();
            assert_eq!(text.lines().next(), Some(HEADER), "{:?}", file);
        }
    }
}
