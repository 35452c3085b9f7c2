pub fn default_port() -> u16 {
    8080
}

pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_prefix() -> String {
    "/".to_string()
}

pub fn default_index_filename() -> String {
    "index.html".to_string()
}
