pub(super) fn default_monitor_interval() -> u64 {
    300
}

pub(super) fn default_listen_port() -> u16 {
    8080
}
