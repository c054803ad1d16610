use iced::widget::{Button, Column, Container, Text, TextInput};
use iced::{alignment, Alignment, Application, Color, Command, Element, Length, Theme};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::executor::TokioExecutor;
use crate::flow::{Effect, Step, VerificationFlow};
use crate::messages::Message;
use crate::password::{
    AddEvent, AddView, FirstRegisterEvent, FirstRegisterView, VerifyEvent, VerifyView,
};
use crate::utils::format_balance;

const SCAN_INPUT_WIDTH: f32 = 400.0;

pub struct WalletVerifyApp {
    flow: VerificationFlow,
    api: ApiClient,
    scan_input: String,
    first_register: Option<FirstRegisterView>,
    verify: Option<VerifyView>,
    add: Option<AddView>,
}

impl WalletVerifyApp {
    /// Rebuild the active step view after the flow moved to a new step.
    /// Only one of the three is ever alive.
    fn sync_step_view(&mut self) {
        self.first_register = None;
        self.verify = None;
        self.add = None;
        match self.flow.step() {
            Step::Empty => {}
            Step::FirstRegister => {
                self.first_register = Some(FirstRegisterView::new(self.flow.address()));
            }
            Step::Verify => {
                self.verify = Some(VerifyView::new(
                    self.flow.address(),
                    self.flow.password_count(),
                ));
            }
            Step::Add => {
                self.add = Some(AddView::new(
                    self.flow.address(),
                    self.flow.password_count(),
                ));
            }
        }
    }

    fn run_effects(&self, effects: Vec<Effect>) -> Command<Message> {
        Command::batch(effects.into_iter().map(|effect| {
            let api = self.api.clone();
            match effect {
                Effect::FetchBalance { address, seq } => Command::perform(
                    async move { api.balance(&address).await },
                    move |result| Message::BalanceFetched { seq, result },
                ),
                Effect::FetchPasswordCount {
                    address,
                    seq,
                    reason,
                } => Command::perform(
                    async move { api.password_count(&address).await },
                    move |count| Message::PasswordCountFetched { seq, count, reason },
                ),
            }
        }))
    }
}

impl Application for WalletVerifyApp {
    type Message = Message;
    type Executor = TokioExecutor;
    type Flags = AppConfig;
    type Theme = Theme;

    fn new(flags: AppConfig) -> (Self, Command<Message>) {
        let app = WalletVerifyApp {
            flow: VerificationFlow::new(),
            api: ApiClient::new(&flags.api_base_url),
            scan_input: String::new(),
            first_register: None,
            verify: None,
            add: None,
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Bitcoin Wallet Password Verification Tool")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::ScannerToggled => {
                self.flow.toggle_scanner();
                if self.flow.scanner_on() {
                    self.scan_input.clear();
                    self.sync_step_view();
                }
                Command::none()
            }
            Message::ScanInputChanged(value) => {
                self.scan_input = value;
                Command::none()
            }
            Message::ScanSubmitted => {
                let candidate = self.scan_input.clone();
                let effects = self.flow.set_address(&candidate);
                self.run_effects(effects)
            }
            Message::BalanceFetched { seq, result } => {
                self.flow.apply_balance(seq, result);
                Command::none()
            }
            Message::PasswordCountFetched { seq, count, reason } => {
                if self.flow.apply_password_count(seq, count, reason) {
                    self.sync_step_view();
                }
                Command::none()
            }
            Message::FirstRegister(msg) => {
                match self.first_register.as_mut().and_then(|view| view.update(msg)) {
                    Some(FirstRegisterEvent::Registered) => {
                        let effects = self.flow.password_added();
                        self.run_effects(effects)
                    }
                    None => Command::none(),
                }
            }
            Message::Verify(msg) => {
                match self.verify.as_mut().and_then(|view| view.update(msg)) {
                    Some(VerifyEvent::AllCorrect(count)) => {
                        self.flow.password_flow_complete(count);
                        self.sync_step_view();
                        Command::none()
                    }
                    None => Command::none(),
                }
            }
            Message::Add(msg) => match self.add.as_mut().and_then(|view| view.update(msg)) {
                Some(AddEvent::Added) => {
                    let effects = self.flow.password_added();
                    self.run_effects(effects)
                }
                None => Command::none(),
            },
        }
    }

    fn view(&self) -> Element<Message> {
        let title = Text::new("지갑 비밀번호 검증")
            .size(24)
            .width(Length::Fill)
            .horizontal_alignment(alignment::Horizontal::Center);

        let description = Text::new("지갑 주소를 스캔하면 등록된 비밀번호를 확인하고 잔액을 조회합니다")
            .size(14)
            .width(Length::Fill)
            .horizontal_alignment(alignment::Horizontal::Center);

        let toggle_label = if self.flow.scanner_on() {
            "QR Scan OFF"
        } else {
            "QR Scan ON"
        };
        let toggle = Button::new(Text::new(toggle_label))
            .on_press(Message::ScannerToggled)
            .padding(10);

        let mut content = Column::new()
            .push(title)
            .push(description)
            .push(toggle)
            .spacing(15)
            .padding(20)
            .width(Length::Fill)
            .align_items(Alignment::Center);

        if self.flow.scanner_on() {
            // stands in for the external QR scanner widget
            content = content
                .push(Text::new("지갑 QR CODE를 스캔해주세요").size(18))
                .push(
                    TextInput::new("지갑 주소", &self.scan_input)
                        .on_input(Message::ScanInputChanged)
                        .on_submit(Message::ScanSubmitted)
                        .padding(10)
                        .size(16)
                        .width(Length::Fixed(SCAN_INPUT_WIDTH)),
                );
        } else {
            if !self.flow.address().is_empty() {
                content = content
                    .push(Text::new(format!("address : {}", self.flow.address())).size(16));
                if self.flow.is_loading_balance() {
                    content = content.push(Text::new("잔액 조회 중...").size(14));
                } else if let Some(sats) = self.flow.balance() {
                    content = content.push(Text::new(format_balance(sats)).size(14));
                } else if let Some(error) = self.flow.balance_error() {
                    content = content.push(
                        Text::new(error.to_string())
                            .size(14)
                            .style(Color::from_rgb(0.8, 0.0, 0.0)),
                    );
                }
            }

            match self.flow.step() {
                Step::Empty => {}
                Step::FirstRegister => {
                    if let Some(view) = &self.first_register {
                        content = content.push(view.view().map(Message::FirstRegister));
                    }
                }
                Step::Verify => {
                    if let Some(view) = &self.verify {
                        content = content.push(view.view().map(Message::Verify));
                    }
                }
                Step::Add => {
                    if let Some(view) = &self.add {
                        content = content.push(view.view().map(Message::Add));
                    }
                }
            }
        }

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .padding(10)
            .into()
    }
}
