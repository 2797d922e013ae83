//! Sample computations on small complex matrices
//!
//! Usage:
//!   linalg_demo [qr|proj|dot|eigen|det|all] [--json]
//!
//! Tolerance comes from COMPLEX_LINALG_CONFIG / COMPLEX_LINALG_EPSILON;
//! RUST_LOG=debug shows the eigen-solver's deflation steps.

use std::env;
use std::process;

use serde::Serialize;

use complex_linalg::prelude::*;
use complex_linalg::format_scalar;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Qr,
    Proj,
    Dot,
    Eigen,
    Det,
}

impl Section {
    const ALL: [Section; 5] = [
        Section::Qr,
        Section::Proj,
        Section::Dot,
        Section::Eigen,
        Section::Det,
    ];

    fn parse(arg: &str) -> Option<Vec<Section>> {
        let section = match arg {
            "qr" => Section::Qr,
            "proj" => Section::Proj,
            "dot" => Section::Dot,
            "eigen" => Section::Eigen,
            "det" => Section::Det,
            "all" => return Some(Self::ALL.to_vec()),
            _ => return None,
        };
        Some(vec![section])
    }
}

#[derive(Debug, Default, Serialize)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    qr: Option<QrReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    projection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eigen: Option<EigenReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    determinants: Vec<String>,
}

#[derive(Debug, Serialize)]
struct QrReport {
    q: Vec<Vec<String>>,
    r: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct EigenReport {
    values: Vec<String>,
    vectors: Vec<Vec<String>>,
}

fn c(re: f64, im: f64) -> C64 {
    C64::new(re, im)
}

fn render_rows(m: &Matrix) -> Vec<Vec<String>> {
    m.to_rows()
        .into_iter()
        .map(|row| row.into_iter().map(format_scalar).collect())
        .collect()
}

fn qr_section() -> LinalgResult<QrReport> {
    let m = Matrix::from_rows(&[vec![c(1.0, 0.0), c(1.0, 1.0)], vec![c(2.0, -1.0), c(3.0, 0.0)]])?;
    let qr = qr_decompose(&m).into_result()?;
    Ok(QrReport {
        q: render_rows(&qr.q),
        r: render_rows(&qr.r),
    })
}

fn projection_section() -> LinalgResult<String> {
    let v = Vector::new(vec![c(2.0, 1.0), c(3.0, -1.0)])?;
    let w = Vector::new(vec![c(1.0, 1.0), c(4.0, -1.0)])?;
    Ok(v.proj(&w)?.into_result()?.to_string())
}

fn dot_section() -> LinalgResult<String> {
    let a = Vector::new(vec![c(1.0, 1.0), c(2.0, 1.0)])?;
    let b = Vector::new(vec![c(3.0, -1.0), c(4.0, 1.0)])?;
    Ok(format_scalar(a.dot(&b)?))
}

fn eigen_section() -> LinalgResult<EigenReport> {
    let m = SquareMatrix::from_rows(&[vec![c(0.0, 1.0), c(2.0, 0.0)], vec![c(1.0, 0.0), c(1.0, 1.0)]])?;
    let pairs = m.eigenpairs()?;
    Ok(EigenReport {
        values: pairs.iter().map(|(lambda, _)| format_scalar(*lambda)).collect(),
        vectors: pairs
            .iter()
            .map(|(_, v)| v.iter().copied().map(format_scalar).collect())
            .collect(),
    })
}

fn determinant_section() -> LinalgResult<Vec<String>> {
    let samples = [
        SquareMatrix::identity(4)?,
        SquareMatrix::from_real_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]])?,
        SquareMatrix::from_real_rows(&[
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 7.0],
        ])?,
        SquareMatrix::from_rows(&[
            vec![c(2.0, 1.0), c(3.0, -1.0), c(4.0, -3.0)],
            vec![c(4.0, 0.0), c(6.0, -1.0), c(2.0, 5.0)],
            vec![c(0.0, 3.0), c(2.0, -1.0), c(1.0, 3.0)],
        ])?,
    ];
    Ok(samples
        .iter()
        .map(|m| {
            let det = m.determinant();
            // snap rounding noise so the output reads as exact integers
            format_scalar(c(det.re.round(), det.im.round()))
        })
        .collect())
}

fn run(sections: &[Section]) -> LinalgResult<Report> {
    let mut report = Report::default();
    for section in sections {
        match section {
            Section::Qr => report.qr = Some(qr_section()?),
            Section::Proj => report.projection = Some(projection_section()?),
            Section::Dot => report.dot = Some(dot_section()?),
            Section::Eigen => report.eigen = Some(eigen_section()?),
            Section::Det => report.determinants = determinant_section()?,
        }
    }
    Ok(report)
}

fn print_text(report: &Report) {
    if let Some(qr) = &report.qr {
        println!("QR decomposition of [[1, 1+i], [2-i, 3]]");
        println!("Q:");
        for row in &qr.q {
            println!("  [{}]", row.join(", "));
        }
        println!("R:");
        for row in &qr.r {
            println!("  [{}]", row.join(", "));
        }
    }
    if let Some(p) = &report.projection {
        println!("proj of (2+i, 3-i) onto (1+i, 4-i): {}", p);
    }
    if let Some(d) = &report.dot {
        println!("(1+i, 2+i) . (3-i, 4+i) = {}", d);
    }
    if let Some(eigen) = &report.eigen {
        println!("eigenpairs of [[i, 2], [1, 1+i]]");
        for (value, vector) in eigen.values.iter().zip(&eigen.vectors) {
            println!("  {}: ({})", value, vector.join(", "));
        }
    }
    if !report.determinants.is_empty() {
        println!("determinants: {}", report.determinants.join(", "));
    }
}

fn main() {
    env_logger::init();

    let mut sections = Section::ALL.to_vec();
    let mut json = false;
    for arg in env::args().skip(1) {
        if arg == "--json" {
            json = true;
            continue;
        }
        match Section::parse(&arg) {
            Some(parsed) => sections = parsed,
            None => {
                eprintln!("Unknown argument: {}", arg);
                eprintln!("Usage: linalg_demo [qr|proj|dot|eigen|det|all] [--json]");
                process::exit(2);
            }
        }
    }

    let config = LinalgConfig::from_env().and_then(|config| config.install());
    if let Err(e) = config {
        eprintln!("{}", e);
        process::exit(1);
    }

    let report = match run(&sections) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("cannot serialize report: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_text(&report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinant_section_samples() {
        let dets = determinant_section().unwrap();
        assert_eq!(dets, vec!["1", "-2", "6", "-118-84i"]);
    }
}
