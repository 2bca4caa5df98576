pub(crate) mod clock;
pub(crate) mod readout;
pub(crate) mod tempo;
