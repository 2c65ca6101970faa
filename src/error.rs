// Every variant states *where* things went wrong.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String), // Creating a window failed
    #[error("window update error: {0}")]
    WindowUpdate(String), // Pushing a buffer to a window failed
    #[error("camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed (fatal at startup)
    #[error("camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed (fatal, stops the loop)
    #[error("config error: {0}")]
    Config(String), // Unreadable/invalid configuration or menu layout
}
