use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with the BOM climate archive: {0}")]
pub struct BomError(pub String);
impl From<ureq::Error> for BomError {
    fn from(e: ureq::Error) -> BomError {
        BomError(format!("http request error: {}", e))
    }
}
impl From<chrono::ParseError> for BomError {
    fn from(e: chrono::ParseError) -> BomError {
        BomError(format!("date field error: {}", e))
    }
}
impl From<std::num::ParseFloatError> for BomError {
    fn from(e: std::num::ParseFloatError) -> BomError {
        BomError(format!("numeric field error: {}", e))
    }
}
