#![allow(dead_code)]

pub mod project {
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A scratch service module: `<tmp>/<service>/` with an optional go.mod.
    pub struct TempProject {
        _root: TempDir,
        dir: PathBuf,
    }

    impl TempProject {
        pub fn new(service: &str) -> Self {
            let root = TempDir::new().unwrap();
            let dir = root.path().join(service);
            fs::create_dir_all(&dir).unwrap();
            Self { _root: root, dir }
        }

        pub fn with_module(service: &str, module: &str) -> Self {
            let project = Self::new(service);
            project.write("go.mod", &format!("module {module}\n\ngo 1.18\n"));
            project
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        pub fn path(&self, rel: &str) -> PathBuf {
            self.dir.join(rel)
        }

        pub fn write(&self, rel: &str, content: &str) {
            let path = self.path(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }

        pub fn read(&self, rel: &str) -> String {
            fs::read_to_string(self.path(rel)).unwrap()
        }

        /// Every file under the project with its contents, sorted by path.
        pub fn snapshot(&self) -> Vec<(PathBuf, String)> {
            let mut files = Vec::new();
            collect(&self.dir, &self.dir, &mut files);
            files.sort();
            files
        }
    }

    fn collect(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, String)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                collect(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                out.push((rel, fs::read_to_string(&path).unwrap()));
            }
        }
    }
}
