//! End-to-end tests for the netgrid collection pipeline.
//!
//! Nothing here needs root or network access: interface facts come from fixed
//! sources and vendor answers from counting stubs.

#[cfg(test)]
mod support;

#[cfg(test)]
mod collector {
    mod integration;
}

#[cfg(test)]
mod vendors {
    mod integration;
}
