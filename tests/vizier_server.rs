//! The UKIRT Faint Standards provider against a local HTTP server standing
//! in for VizieR.

use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use tempfile::tempdir;
use ukirtfs::catalogs::{CatalogProvider, UkirtFaintStandards};
use ukirtfs::data::VizierClient;
use ukirtfs::generator::{generate, GeneratorOptions, OutputSink};
use ukirtfs::StarlistError;

const TABLE: &str = "\
#
#   VizieR Astronomical Server vizier.cds.unistra.fr
#
#RESOURCE=yCat_3730781
#Name: J/MNRAS/373/781

_RAJ2000\t_DEJ2000\tSimbadName\tName\tSpType\tJmag\te_Jmag\tHmag\te_Hmag\tKmag\te_Kmag\tpmRA\tpmDE
deg\tdeg\t\t\t\tmag\tmag\tmag\tmag\tmag\tmag\tmas/yr\tmas/yr
---------\t---------\t----------\t---------\t----\t------\t-----\t------\t-----\t------\t-----\t-----\t-----
13.2450\t+1.1900\tFS 1\tSA 92-342\tF5 V\t11.612\t0.008\t\t\t\t\t10.0\t-5.0
23.8000\t-0.9500\tGD 50\t\tDA\t14.450\t0.010\t\t\t14.700\t0.020\t85.0\t-160.0

#END#
";

const FS_1_LINE: &str = "FS 1            00 52 58.800 +01 11 24.000 2000 \
Jmag=11.61 e_Jmag=0.01 pmra=0.0007 pmdec=-0.0050 SpType=F5_V Name=SA_92-342";

/// Serve a single canned HTTP response, returning the address to query and
/// the request line the server received.
fn serve_once(status: &str, content_type: &str, body: &str) -> (SocketAddr, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buffer).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..n]);
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        let request = String::from_utf8_lossy(&request);
        let request_line = request.lines().next().unwrap_or_default().to_string();
        let _ = sender.send(request_line);
    });

    (addr, receiver)
}

fn provider(addr: SocketAddr) -> UkirtFaintStandards {
    let client = VizierClient::new()
        .with_base_url(format!("http://{}/viz-bin/asu-tsv", addr))
        .with_timeout(Duration::from_secs(10));
    UkirtFaintStandards::new(client)
}

#[test]
fn test_server_error_is_provider_error() {
    let (addr, _) = serve_once("500 Internal Server Error", "text/plain", "overloaded");
    let err = provider(addr).list_all().unwrap_err();
    assert!(matches!(err, StarlistError::ProviderError(_)));
    assert!(err.to_string().contains("500"), "{}", err);
}

#[test]
fn test_html_page_is_provider_error() {
    let body = "<!DOCTYPE html>\n<html>\n<head><title>VizieR</title></head>\n\
                <body><p>Service temporarily unavailable</p></body>\n</html>\n";
    let (addr, _) = serve_once("200 OK", "text/html", body);
    assert!(matches!(
        provider(addr).list_all(),
        Err(StarlistError::ProviderError(_))
    ));
}

#[test]
fn test_table_becomes_starlist_lines() {
    let (addr, requests) = serve_once("200 OK", "text/tab-separated-values", TABLE);
    let records = provider(addr).list_all().unwrap();

    let request_line = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(request_line.starts_with("GET /viz-bin/asu-tsv?"), "{}", request_line);
    assert!(request_line.contains("-source=J%2FMNRAS%2F373%2F781"), "{}", request_line);

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["FS 1", "GD 50"]);
    assert_eq!(records[0].to_target().to_starlist(), FS_1_LINE);
}

#[test]
fn test_fs_run_writes_single_primary() {
    let (addr, _) = serve_once("200 OK", "text/tab-separated-values", TABLE);
    let dir = tempdir().unwrap();
    let path = dir.path().join("ukirtfs.txt");
    let options = GeneratorOptions {
        primary_only: true,
        ..Default::default()
    };

    let written = generate(&provider(addr), &options, &OutputSink::File(path.clone())).unwrap();
    assert_eq!(written, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\n", FS_1_LINE));
}

#[test]
fn test_server_error_creates_no_file() {
    let (addr, _) = serve_once("503 Service Unavailable", "text/plain", "");
    let dir = tempdir().unwrap();
    let path = dir.path().join("ukirtfs.txt");

    let result = generate(
        &provider(addr),
        &GeneratorOptions::default(),
        &OutputSink::File(path.clone()),
    );
    assert!(matches!(result, Err(StarlistError::ProviderError(_))));
    assert!(!path.exists());
}
