use sawari_core::media::ImageFile;
use sawari_core::repository::AuthGateway;

use crate::notice::Notice;

/// The driver's payment-QR upload control: stage one image as a preview,
/// then upload it explicitly. The control is disabled while an upload is in
/// flight so it cannot be submitted twice.
#[derive(Debug, Default)]
pub struct QrUpload {
    staged: Option<ImageFile>,
    uploading: bool,
    closed: bool,
    pub notice: Option<Notice>,
}

impl QrUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, image: ImageFile) {
        self.staged = Some(image);
    }

    pub fn remove(&mut self) {
        self.staged = None;
    }

    pub fn staged(&self) -> Option<&ImageFile> {
        self.staged.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn can_upload(&self) -> bool {
        !self.uploading
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub async fn upload(&mut self, gateway: &dyn AuthGateway) {
        if self.uploading {
            return;
        }
        let Some(image) = self.staged.clone() else {
            self.notice = Some(Notice::failure("Please select an image first."));
            return;
        };

        self.uploading = true;
        let result = gateway.upload_qr(&image).await;
        self.uploading = false;

        match result {
            Ok(message) => {
                self.notice = Some(Notice::success(message));
                self.closed = true;
            }
            Err(err) => {
                self.notice = Some(Notice::error(&err));
            }
        }
    }
}
