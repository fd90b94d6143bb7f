use crate::containers::ForwardQueue;
use kinematics::Displacement;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ROUTE_FILE: &str = "pontos.csv";

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("cannot open waypoint file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read waypoint file: {0}")]
    Read(#[from] csv::Error),

    #[error("malformed waypoint on line {line}: {reason}")]
    Format { line: u64, reason: String },
}

pub fn load_route<P: AsRef<Path>>(path: P) -> Result<ForwardQueue, RouteError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| RouteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let route = read_route(file)?;
    log::info!("Loaded {} waypoints from {:?}", route.len(), path);
    Ok(route)
}

pub fn read_route<R: Read>(reader: R) -> Result<ForwardQueue, RouteError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut route = ForwardQueue::new();
    let mut expected_line = 1;
    for result in reader.records() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(expected_line);

        // The reader skips empty lines, which count as records with no fields.
        if line != expected_line {
            return Err(RouteError::Format {
                line: expected_line,
                reason: "expected 2 fields, found 0".to_string(),
            });
        }
        expected_line = line + 1;

        if record.len() != 2 {
            return Err(RouteError::Format {
                line,
                reason: format!("expected 2 fields, found {}", record.len()),
            });
        }

        let dx = parse_field(&record[0], line)?;
        let dy = parse_field(&record[1], line)?;
        route.enqueue(Displacement::new(dx, dy));
    }

    Ok(route)
}

fn parse_field(field: &str, line: u64) -> Result<f64, RouteError> {
    field.parse::<f64>().map_err(|e| RouteError::Format {
        line,
        reason: format!("{:?} is not a number ({})", field, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_route() {
        let data = "1.0,0.0\n0, 1.5\n-2.5 , -1\n";
        let route = read_route(data.as_bytes()).unwrap();
        assert_eq!(
            route.to_vec(),
            vec![
                Displacement::new(1.0, 0.0),
                Displacement::new(0.0, 1.5),
                Displacement::new(-2.5, -1.0),
            ]
        );
    }

    #[test]
    fn test_read_empty_route() {
        let route = read_route("".as_bytes()).unwrap();
        assert!(route.is_empty());
    }

    #[test]
    fn test_wrong_field_count() {
        let err = read_route("1.0,2.0\n3.0\n".as_bytes()).unwrap_err();
        match err {
            RouteError::Format { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {}", other),
        }

        let err = read_route("1.0,2.0,3.0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RouteError::Format { line: 1, .. }));
    }

    #[test]
    fn test_blank_line() {
        let err = read_route("1.0,0.0\n\n0.0,1.0\n".as_bytes()).unwrap_err();
        match err {
            RouteError::Format { line, reason } => {
                assert_eq!(line, 2);
                assert_eq!(reason, "expected 2 fields, found 0");
            }
            other => panic!("unexpected error: {}", other),
        }

        // A trailing newline is not a blank line.
        let route = read_route("1.0,0.0\n0.0,1.0\n".as_bytes()).unwrap();
        assert_eq!(route.len(), 2);
        let route = read_route("1.0,0.0\n0.0,1.0".as_bytes()).unwrap();
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn test_non_numeric_field() {
        let err = read_route("1.0,2.0\n4.0,north\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RouteError::Format { line: 2, .. }));
        assert!(err.to_string().contains("north"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_route("/nonexistent/route.csv").unwrap_err();
        assert!(matches!(err, RouteError::Io { .. }));
    }
}
