pub mod configuration;

pub mod manager {
    pub mod managererror;
    pub mod manager;
}

pub mod store {
    pub mod breakpoint;
    pub mod stepfunction;
    pub mod rangeerror;
    pub mod segmentstore;
    pub mod profilemanager;
}
