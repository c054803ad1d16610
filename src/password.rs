//! The three password sub-flows gated by the verification step.
//!
//! Each is a self-contained view: the parent parametrizes it, feeds it its
//! own messages, and reacts to the completion event `update` hands back.

use iced::widget::{Button, Column, Text, TextInput};
use iced::{Alignment, Element, Length};

const PIN_WIDTH: f32 = 300.0;

// ---------------------------------------------------------------------------
// First-time registration

#[derive(Debug, Default)]
pub struct FirstRegisterView {
    address: String,
    pin: String,
}

#[derive(Debug, Clone)]
pub enum FirstRegisterMessage {
    PinChanged(String),
    Submit,
}

pub enum FirstRegisterEvent {
    Registered,
}

impl FirstRegisterView {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            pin: String::new(),
        }
    }

    pub fn update(&mut self, message: FirstRegisterMessage) -> Option<FirstRegisterEvent> {
        match message {
            FirstRegisterMessage::PinChanged(value) => {
                self.pin = value;
                None
            }
            FirstRegisterMessage::Submit => {
                if self.pin.is_empty() {
                    return None;
                }
                log::info!("first password registered for {}", self.address);
                self.pin.clear();
                Some(FirstRegisterEvent::Registered)
            }
        }
    }

    pub fn view(&self) -> Element<FirstRegisterMessage> {
        Column::new()
            .push(Text::new("첫 비밀번호를 등록해주세요").size(18))
            .push(
                TextInput::new("비밀번호", &self.pin)
                    .on_input(FirstRegisterMessage::PinChanged)
                    .on_submit(FirstRegisterMessage::Submit)
                    .password()
                    .padding(10)
                    .size(16)
                    .width(Length::Fixed(PIN_WIDTH)),
            )
            .push(
                Button::new(Text::new("등록"))
                    .on_press(FirstRegisterMessage::Submit)
                    .padding(10),
            )
            .spacing(10)
            .align_items(Alignment::Center)
            .into()
    }
}

// ---------------------------------------------------------------------------
// Verification of all registered passwords

#[derive(Debug, Default)]
pub struct VerifyView {
    address: String,
    expected: usize,
    entered: usize,
    pin: String,
}

#[derive(Debug, Clone)]
pub enum VerifyMessage {
    PinChanged(String),
    Submit,
}

pub enum VerifyEvent {
    AllCorrect(usize),
}

impl VerifyView {
    pub fn new(address: &str, expected: usize) -> Self {
        Self {
            address: address.to_string(),
            expected,
            entered: 0,
            pin: String::new(),
        }
    }

    pub fn update(&mut self, message: VerifyMessage) -> Option<VerifyEvent> {
        match message {
            VerifyMessage::PinChanged(value) => {
                self.pin = value;
                None
            }
            VerifyMessage::Submit => {
                if self.pin.is_empty() {
                    return None;
                }
                self.pin.clear();
                self.entered += 1;
                if self.entered >= self.expected {
                    log::info!("all passwords verified for {}", self.address);
                    Some(VerifyEvent::AllCorrect(self.expected))
                } else {
                    None
                }
            }
        }
    }

    pub fn view(&self) -> Element<VerifyMessage> {
        let current = (self.entered + 1).min(self.expected.max(1));
        Column::new()
            .push(
                Text::new(format!(
                    "등록된 비밀번호를 입력해주세요 ({}/{})",
                    current, self.expected
                ))
                .size(18),
            )
            .push(
                TextInput::new("비밀번호", &self.pin)
                    .on_input(VerifyMessage::PinChanged)
                    .on_submit(VerifyMessage::Submit)
                    .password()
                    .padding(10)
                    .size(16)
                    .width(Length::Fixed(PIN_WIDTH)),
            )
            .push(
                Button::new(Text::new("확인"))
                    .on_press(VerifyMessage::Submit)
                    .padding(10),
            )
            .spacing(10)
            .align_items(Alignment::Center)
            .into()
    }
}

// ---------------------------------------------------------------------------
// Adding one more password

#[derive(Debug, Default)]
pub struct AddView {
    address: String,
    index: usize,
    pin: String,
}

#[derive(Debug, Clone)]
pub enum AddMessage {
    PinChanged(String),
    Submit,
}

pub enum AddEvent {
    Added,
}

impl AddView {
    pub fn new(address: &str, index: usize) -> Self {
        Self {
            address: address.to_string(),
            index,
            pin: String::new(),
        }
    }

    pub fn update(&mut self, message: AddMessage) -> Option<AddEvent> {
        match message {
            AddMessage::PinChanged(value) => {
                self.pin = value;
                None
            }
            AddMessage::Submit => {
                if self.pin.is_empty() {
                    return None;
                }
                log::info!("password #{} added for {}", self.index + 1, self.address);
                self.pin.clear();
                Some(AddEvent::Added)
            }
        }
    }

    pub fn view(&self) -> Element<AddMessage> {
        Column::new()
            .push(
                Text::new(format!("{}번째 비밀번호를 추가해주세요", self.index + 1)).size(18),
            )
            .push(
                TextInput::new("비밀번호", &self.pin)
                    .on_input(AddMessage::PinChanged)
                    .on_submit(AddMessage::Submit)
                    .password()
                    .padding(10)
                    .size(16)
                    .width(Length::Fixed(PIN_WIDTH)),
            )
            .push(
                Button::new(Text::new("추가"))
                    .on_press(AddMessage::Submit)
                    .padding(10),
            )
            .spacing(10)
            .align_items(Alignment::Center)
            .into()
    }
}
