//! Instance files: a job count `n` followed by `n` whitespace-separated `p w d` triples.
//!
//! Job ids are assigned from the 1-based position of each triple.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::error::SchedulerError;
use crate::job::{Job, TaskSet};
use crate::Id;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of input while reading {0}")]
    UnexpectedEof(String),

    #[error("Invalid {expected}: '{token}'")]
    InvalidToken { token: String, expected: String },

    #[error("Instance declares no jobs")]
    NoJobs,

    #[error("Job {id} has a zero {field}")]
    NonPositive { id: Id, field: &'static str },

    #[error("Unexpected data after the last job: '{0}'")]
    TrailingInput(String),
}

impl From<LoadError> for SchedulerError {
    fn from(e: LoadError) -> Self {
        SchedulerError::InputFormat(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceLoader {
    allow_trailing: bool,
}

impl Default for InstanceLoader {
    fn default() -> Self {
        Self {
            allow_trailing: true,
        }
    }
}

impl InstanceLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether tokens after the last triple are ignored (default) or rejected.
    #[inline]
    pub fn allow_trailing(mut self, yes: bool) -> Self {
        self.allow_trailing = yes;
        self
    }

    pub fn from_bufread<R: BufRead>(&self, mut br: R) -> Result<TaskSet, LoadError> {
        let mut sc = Scanner::new(&mut br);
        let n: usize = sc.next("job count")?;
        if n == 0 {
            return Err(LoadError::NoJobs);
        }

        let mut jobs = TaskSet::with_capacity(n);
        for i in 0..n {
            let id = Id::try_from(i + 1).map_err(|_| LoadError::InvalidToken {
                token: n.to_string(),
                expected: "job count".to_string(),
            })?;
            let p: u32 = sc.next(&format!("processing time of job {}", id))?;
            let w: u64 = sc.next(&format!("weight of job {}", id))?;
            let d: u32 = sc.next(&format!("deadline of job {}", id))?;

            if p == 0 {
                return Err(LoadError::NonPositive {
                    id,
                    field: "processing time",
                });
            }
            if w == 0 {
                return Err(LoadError::NonPositive { id, field: "weight" });
            }
            jobs.push(Job::new(id, p, w, d));
        }

        if !self.allow_trailing {
            if let Some(tok) = sc.next_token()? {
                return Err(LoadError::TrailingInput(tok));
            }
        }

        Ok(jobs)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<TaskSet, LoadError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<TaskSet, LoadError> {
        self.from_bufread(BufReader::new(r))
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<TaskSet, LoadError> {
        self.from_reader(s.as_bytes())
    }
}

/// Renders `jobs` in the instance format, in id order.
pub fn format_instance(jobs: &TaskSet) -> String {
    let mut sorted: Vec<&Job> = jobs.iter().collect();
    sorted.sort_by_key(|j| j.id());

    let mut out = String::new();
    let _ = writeln!(out, "{}", sorted.len());
    for job in sorted {
        let _ = writeln!(out, "{} {} {}", job.p(), job.w(), job.d());
    }
    out
}

#[derive(Debug)]
struct Scanner<R: BufRead> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    /// Next whitespace-delimited token, `None` at end of input.
    fn next_token(&mut self) -> Result<Option<String>, LoadError> {
        loop {
            let bytes = self.buf.as_bytes();
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos < bytes.len() {
                let start = self.pos;
                while self.pos < bytes.len() && !bytes[self.pos].is_ascii_whitespace() {
                    self.pos += 1;
                }
                return Ok(Some(self.buf[start..self.pos].to_string()));
            }

            self.buf.clear();
            self.pos = 0;
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
        }
    }

    fn next<T: std::str::FromStr>(&mut self, expected: &str) -> Result<T, LoadError> {
        let tok = self
            .next_token()?
            .ok_or_else(|| LoadError::UnexpectedEof(expected.to_string()))?;
        tok.parse::<T>().map_err(|_| LoadError::InvalidToken {
            token: tok,
            expected: expected.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const THREE_JOBS: &str = r#"
        3
        2 10 2
        1 5  2
        3 1  4
    "#;

    #[test]
    fn loads_jobs_with_one_based_ids() {
        let jobs = InstanceLoader::new().from_str(THREE_JOBS).unwrap();
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0], Job::new(1, 2, 10, 2));
        assert_eq!(jobs[2], Job::new(3, 3, 1, 4));
    }

    #[test]
    fn triples_may_span_lines() {
        let jobs = InstanceLoader::new().from_str("2 1\n2 3 4\n5 6").unwrap();
        assert_eq!(jobs[0], Job::new(1, 1, 2, 3));
        assert_eq!(jobs[1], Job::new(2, 4, 5, 6));
    }

    #[test]
    fn short_input_is_an_error() {
        let err = InstanceLoader::new().from_str("2\n1 1 1\n1 1").unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof(ref what) if what.contains("job 2")));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            InstanceLoader::new().from_str(""),
            Err(LoadError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn zero_jobs_is_an_error() {
        assert!(matches!(
            InstanceLoader::new().from_str("0"),
            Err(LoadError::NoJobs)
        ));
    }

    #[test]
    fn garbage_token_is_an_error() {
        let err = InstanceLoader::new().from_str("1\n1 x 1").unwrap_err();
        match err {
            LoadError::InvalidToken { token, expected } => {
                assert_eq!(token, "x");
                assert_eq!(expected, "weight of job 1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(InstanceLoader::new().from_str("1\n-1 1 1").is_err());
    }

    #[test]
    fn zero_processing_time_is_rejected() {
        assert!(matches!(
            InstanceLoader::new().from_str("1\n0 1 1"),
            Err(LoadError::NonPositive { id: 1, .. })
        ));
    }

    #[test]
    fn trailing_data_policy() {
        let input = "1\n1 1 1\n7";
        assert!(InstanceLoader::new().from_str(input).is_ok());
        let strict = InstanceLoader::new().allow_trailing(false);
        assert!(matches!(
            strict.from_str(input),
            Err(LoadError::TrailingInput(ref t)) if t == "7"
        ));
    }

    #[test]
    fn converts_into_input_format_error() {
        let err: SchedulerError = LoadError::NoJobs.into();
        assert_eq!(err.kind(), ErrorKind::InputFormat);
    }

    #[test]
    fn format_instance_round_trips_through_the_loader() {
        let jobs = InstanceLoader::new().from_str(THREE_JOBS).unwrap();
        let text = format_instance(&jobs);
        assert_eq!(text, "3\n2 10 2\n1 5 2\n3 1 4\n");
        assert_eq!(InstanceLoader::new().from_str(&text).unwrap(), jobs);
    }

    #[test]
    fn loads_bundled_instances() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("instances");
        let mut files: Vec<_> = std::fs::read_dir(&dir)
            .expect("read_dir(instances) failed")
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|x| x == "txt").unwrap_or(false))
            .collect();
        files.sort();
        assert!(!files.is_empty());

        for path in files {
            let jobs = InstanceLoader::default()
                .from_path(&path)
                .unwrap_or_else(|e| panic!("Failed to load {}: {e}", path.display()));
            assert!(jobs.validate().is_ok(), "invalid jobs in {}", path.display());
        }
    }
}
