use crate::config::AudioSettings;
use std::path::PathBuf;

/// Background audio that plays while the heart is on screen.
pub trait Soundtrack {
    /// Start, or resume, playback.
    fn play(&mut self) -> Result<(), AudioError>;

    /// Move playback back to the beginning.
    fn rewind(&mut self) -> Result<(), AudioError>;
}

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("no audio file configured")]
    NotConfigured,

    #[error("audio support not compiled in, cannot play {path}", path = .0.display())]
    Unsupported(PathBuf),

    #[error("opening {path}: {error}", path = .0.display(), error = .1)]
    Io(PathBuf, std::io::Error),

    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("cannot decode {path}: {error}", path = .0.display(), error = .1)]
    Decode(PathBuf, String),
}

/// The soundtrack used when there's nothing to play.
#[derive(Debug, Default)]
pub struct Silence {
    path: Option<PathBuf>,
}

impl Soundtrack for Silence {
    fn play(&mut self) -> Result<(), AudioError> {
        match &self.path {
            Some(path) => Err(AudioError::Unsupported(path.clone())),
            None => Err(AudioError::NotConfigured),
        }
    }

    fn rewind(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Build the soundtrack described by the audio settings.
pub fn soundtrack(settings: &AudioSettings) -> Box<dyn Soundtrack> {
    match &settings.path {
        #[cfg(feature = "audio")]
        Some(path) => Box::new(player::FileSoundtrack::new(path.clone(), settings.volume)),
        #[cfg(not(feature = "audio"))]
        Some(path) => Box::new(Silence { path: Some(path.clone()) }),
        None => Box::new(Silence::default()),
    }
}

#[cfg(feature = "audio")]
mod player {
    use super::{AudioError, Soundtrack};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::fs::File;
    use std::io::BufReader;
    use std::path::PathBuf;
    use std::time::Duration;

    struct Output {
        // the stream stops playing once dropped
        _stream: OutputStream,
        _handle: OutputStreamHandle,
        sink: Sink,
    }

    /// Plays an audio file through the default output device.
    ///
    /// The device is only opened on the first call to `play`.
    pub(crate) struct FileSoundtrack {
        path: PathBuf,
        volume: f32,
        output: Option<Output>,
    }

    impl FileSoundtrack {
        pub(crate) fn new(path: PathBuf, volume: f32) -> Self {
            Self { path, volume, output: None }
        }

        fn open(&self) -> Result<Output, AudioError> {
            let file = File::open(&self.path).map_err(|e| AudioError::Io(self.path.clone(), e))?;
            let source =
                Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode(self.path.clone(), e.to_string()))?;
            let (stream, handle) = OutputStream::try_default().map_err(|e| AudioError::Output(e.to_string()))?;
            let sink = Sink::try_new(&handle).map_err(|e| AudioError::Output(e.to_string()))?;
            sink.set_volume(self.volume);
            sink.append(source);
            Ok(Output { _stream: stream, _handle: handle, sink })
        }
    }

    impl Soundtrack for FileSoundtrack {
        fn play(&mut self) -> Result<(), AudioError> {
            if self.output.is_none() {
                self.output = Some(self.open()?);
            }
            if let Some(output) = &self.output {
                output.sink.play();
            }
            Ok(())
        }

        fn rewind(&mut self) -> Result<(), AudioError> {
            let Some(output) = &self.output else {
                return Ok(());
            };
            output.sink.try_seek(Duration::ZERO).map_err(|e| AudioError::Output(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_reports_missing_file() {
        let mut soundtrack = soundtrack(&AudioSettings::default());
        assert!(matches!(soundtrack.play(), Err(AudioError::NotConfigured)));
        assert!(soundtrack.rewind().is_ok());
    }

    #[test]
    fn errors_name_the_file() {
        let error = AudioError::Decode("song.mp3".into(), "unrecognized format".into());
        assert_eq!(error.to_string(), "cannot decode song.mp3: unrecognized format");
    }

    #[cfg(not(feature = "audio"))]
    #[test]
    fn configured_file_without_audio_support() {
        let settings = AudioSettings { path: Some("song.mp3".into()), ..Default::default() };
        let mut soundtrack = soundtrack(&settings);
        assert!(matches!(soundtrack.play(), Err(AudioError::Unsupported(_))));
    }
}
