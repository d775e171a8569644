use std::io;

use webbrowser::Browser;

/// Opens documentation links outside the terminal.
pub trait LinkOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Production opener backed by the system web browser
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        if !Browser::is_available() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no web browser available",
            ));
        }
        webbrowser::open(url)
    }
}

/// Opener that remembers requested links instead of opening them, for tests
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: std::cell::RefCell<Vec<String>>,
    fail: bool,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// An opener whose every `open` call fails.
    pub fn failing() -> Self {
        Self {
            opened: Default::default(),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::Other, "browser crashed"));
        }
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

impl<T: LinkOpener + ?Sized> LinkOpener for std::rc::Rc<T> {
    fn open(&self, url: &str) -> io::Result<()> {
        (**self).open(url)
    }
}
