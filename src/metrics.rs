use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

static API_REQ: Lazy<Mutex<HashMap<String, u64>>> = Lazy::new(|| Mutex::new(HashMap::new()));
static BACKEND: Lazy<Mutex<HashMap<(String, String), u64>>> = Lazy::new(|| Mutex::new(HashMap::new()));

pub fn inc_api_request(path: &str) {
    let mut g = API_REQ.lock().unwrap();
    *g.entry(path.to_string()).or_insert(0) += 1;
}

pub fn inc_backend_call(service: &str, status: &str) {
    let mut g = BACKEND.lock().unwrap();
    *g.entry((service.to_string(), status.to_string())).or_insert(0) += 1;
}

pub fn gather_prometheus(build_version: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# TYPE paperscout_build_info gauge\npaperscout_build_info{{version=\"{}\"}} 1\n",
        build_version
    ));
    out.push_str("# HELP paperscout_api_requests_total API requests total\n# TYPE paperscout_api_requests_total counter\n");
    for (k, v) in API_REQ.lock().unwrap().iter() {
        out.push_str(&format!("paperscout_api_requests_total{{path=\"{}\"}} {}\n", k, v));
    }
    out.push_str("# HELP paperscout_backend_calls_total External backend calls by status\n# TYPE paperscout_backend_calls_total counter\n");
    for ((service, status), v) in BACKEND.lock().unwrap().iter() {
        out.push_str(&format!(
            "paperscout_backend_calls_total{{service=\"{}\",status=\"{}\"}} {}\n",
            service, status, v
        ));
    }
    out
}
