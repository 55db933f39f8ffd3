use std::path::PathBuf;

use docserve::config::Config;

#[test]
fn test_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.root_dir, PathBuf::from("."));
    assert!(cfg.alias_file.is_none());
    assert_eq!(cfg.idle_timeout().as_secs(), 30);
}

#[test]
fn test_yaml_overrides() {
    let yaml = "\
listen_addr: 0.0.0.0:9000
root_dir: /srv/docs
alias_file: /etc/docserve/aliases
idle_timeout_secs: 10
";
    let cfg: Config = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:9000");
    assert_eq!(cfg.root_dir, PathBuf::from("/srv/docs"));
    assert_eq!(cfg.alias_file, Some(PathBuf::from("/etc/docserve/aliases")));
    assert_eq!(cfg.idle_timeout().as_secs(), 10);
}

#[test]
fn test_partial_yaml_keeps_defaults() {
    let cfg: Config = serde_yaml::from_str("listen_addr: 127.0.0.1:0\n").unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:0");
    assert_eq!(cfg.root_dir, PathBuf::from("."));
    assert_eq!(cfg.idle_timeout_secs, 30);
}
