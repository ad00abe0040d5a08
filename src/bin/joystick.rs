//! STM32 Joystick with PWM LEDs and SSD1306 OLED
//! =============================================================================================
//!
//! Date			Author          Notes
//! 2025-08-02	    YHY             Initial release
//!
//!==============================================================================================
//!
//! Reads a two-axis analog joystick and shows its position as an 8x8 square on a 128x64
//! SSD1306. The red and blue LEDs follow the X and Y axes. The joystick button toggles the
//! green LED and cycles the screen border (none, single, double); button A turns the red and
//! blue LEDs on or off.
//!
//! Hardware Connections:
//!   Joystick -> Blue Pill
//!      VRx  -> PA0 (ADC1_IN0)
//!      VRy  -> PA1 (ADC1_IN1)
//!      SW   -> PB12
//!
//!   Button A -> PB13 (to GND when pressed, internal pull-up)
//!
//!   LEDs -> Blue Pill
//!      Red   -> PA6 (TIM3_CH1)
//!      Blue  -> PA7 (TIM3_CH2)
//!      Green -> PB0
//!
//!   OLED Display -> Blue Pill
//!      SDA  -> PB7 (I2C1)
//!      SCL  -> PB6 (I2C1)

#![no_std] // 禁用标准库，适用于裸机嵌入式环境
#![no_main] // 禁用标准main入口，使用自定义入口点

use embassy_executor::{InterruptExecutor, Spawner};
use embassy_stm32::{
    adc::{self, Adc},
    bind_interrupts,
    exti::ExtiInput,
    gpio::{Level, Output, OutputType, Pull, Speed},
    i2c,
    interrupt,
    interrupt::{InterruptExt, Priority},
    peripherals,
    time::{Hertz, khz},
    timer::simple_pwm::{PwmPin, SimplePwm},
};
use embassy_time::{Instant, Timer};
use {defmt_rtt as _, panic_probe as _}; // 日志记录和panic处理

use joystick_oled::{
    app::{Controller, TickReport},
    config::{
        DEBOUNCE_SCOPE, DEBOUNCE_US, HSE_HZ, I2C_FREQUENCY_HZ, PCLK1_HZ, STARTUP_DELAY_MS,
        SYSCLK_HZ, TICK_MS,
    },
    hardware::{
        gpio_button::GpioButton, gpio_led::GpioLed, joystick_adc::JoystickAdc, oled,
        pwm_leds::PwmLedPair,
    },
    input::{ButtonId, InputEvents},
};

// ADC转换完成中断
bind_interrupts!(struct Irqs {
    ADC1_2 => adc::InterruptHandler<peripherals::ADC1>;
});

/// 按键标志与消抖状态，由按键任务写入、主循环读取并清除
static EVENTS: InputEvents = InputEvents::new(DEBOUNCE_US, DEBOUNCE_SCOPE);

/// 按键任务所用的高优先级执行器，借用未使用的USART3中断运行
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn USART3() {
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

/// 主入口函数
///
/// Embassy执行器的主入口点，负责：
/// 1. 配置系统时钟（HSE 8MHz + PLL倍频到72MHz，APB1 36MHz）
/// 2. 在高优先级执行器上启动两个按键边沿任务
/// 3. 初始化绿色LED、摇杆ADC、红蓝PWM LED和OLED显示屏
/// 4. 以50ms为间隔运行主循环：采样 → LED → 按键 → 绘制并发送
///
/// # 参数
/// - `_spawner`: 线程模式任务生成器（主循环直接在本任务中运行）
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    // 配置系统时钟（使用外部8MHz晶振，通过PLL倍频到72MHz）
    // APB1必须为36MHz，I2C快速模式分频才能精确得到400kHz
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = Some(Hse {
            freq: Hertz(HSE_HZ),
            // 开发板使用外部振荡器
            mode: HseMode::Oscillator,
        });
        config.rcc.pll = Some(Pll {
            src: PllSource::HSE,     // PLL时钟源选择HSE
            prediv: PllPreDiv::DIV1, // 预分频系数
            mul: PllMul::MUL9,       // 倍频系数（8MHz * 9 = 72MHz）
        });
        config.rcc.sys = Sysclk::PLL1_P; // 系统时钟源选择PLL输出
        config.rcc.ahb_pre = AHBPrescaler::DIV1; // AHB预分频（72MHz）
        config.rcc.apb1_pre = APBPrescaler::DIV2; // APB1预分频（36MHz）
        config.rcc.apb2_pre = APBPrescaler::DIV1; // APB2预分频（72MHz）
    }

    // 初始化外设
    let p = embassy_stm32::init(config);

    defmt::info!(
        "系统启动! SYSCLK {} Hz, APB1 {} Hz, 消抖 {} us ({})",
        SYSCLK_HZ,
        PCLK1_HZ,
        DEBOUNCE_US,
        DEBOUNCE_SCOPE
    );

    // 上电后等待外设稳定
    Timer::after_millis(STARTUP_DELAY_MS).await;

    // 配置按键（上拉输入，按下为低电平，下降沿触发EXTI中断）
    // PB12: 摇杆按键, PB13: 按键A
    let joystick_button = ExtiInput::new(p.PB12, p.EXTI12, Pull::Up);
    let button_a = ExtiInput::new(p.PB13, p.EXTI13, Pull::Up);

    // 启动高优先级执行器，按键任务可抢占主循环（包括阻塞的I2C发送）
    interrupt::USART3.set_priority(Priority::P6);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::USART3);
    defmt::unwrap!(high_spawner.spawn(button_edges(
        GpioButton::new(joystick_button),
        ButtonId::Joystick
    )));
    defmt::unwrap!(high_spawner.spawn(button_edges(GpioButton::new(button_a), ButtonId::A)));

    // 配置绿色LED（PB0，高电平点亮，初始熄灭）
    let green_led = GpioLed::active_high(Output::new(p.PB0, Level::Low, Speed::Low));

    // 配置摇杆ADC（PA0: X轴, PA1: Y轴，12位分辨率）
    let mut joystick = JoystickAdc::new(Adc::new(p.ADC1), p.PA0, p.PA1);

    // 配置红蓝LED的PWM输出（TIM3 CH1: PA6 红色, CH2: PA7 蓝色，1kHz）
    let pwm = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new_ch1(p.PA6, OutputType::PushPull)),
        Some(PwmPin::new_ch2(p.PA7, OutputType::PushPull)),
        None,
        None,
        khz(1),
        Default::default(),
    );
    let pwm_leds = PwmLedPair::new(pwm);

    // 配置I2C1接口（PB6: SCL, PB7: SDA）用于OLED
    // 设置时钟频率为400kHz（阻塞模式）
    let i2c = i2c::I2c::new_blocking(
        p.I2C1,
        p.PB6,
        p.PB7,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );

    // 初始化显示屏并发送一帧空白画面，失败则停机
    let display = match oled::init(i2c) {
        Ok(display) => display,
        Err(e) => defmt::panic!("显示屏初始化失败: {}", defmt::Debug2Format(&e)),
    };

    // 控制器接管LED与显示屏，并写入绿色LED初始状态
    let mut controller = Controller::new(pwm_leds, green_led, display, &EVENTS);

    // 主循环（固定延时，无退出条件）
    loop {
        // 依次采样X轴和Y轴
        let sample = joystick.sample().await;

        // 更新LED、处理按键、绘制并发送画面
        match controller.tick(sample) {
            Ok(report) => log_report(&report),
            Err(e) => defmt::warn!("画面发送失败: {}", defmt::Debug2Format(&e)),
        }

        // 等待下一个周期（50ms，约20Hz）
        Timer::after_millis(TICK_MS).await;
    }
}

/// 按键边沿任务
///
/// 此异步任务运行在高优先级中断执行器上，相当于GPIO中断回调：
/// 1. 等待下降沿（按键按下），等待期间EXTI线处于使能状态
/// 2. 立即读取当前时间戳（微秒）
/// 3. 与上次接受的时间比较，超过消抖窗口则置位按键标志
/// 4. 记录接受或丢弃的边沿
///
/// 由于任务可抢占主循环，时间戳在中断到来时读取，不会因I2C发送而延迟。
///
/// # 参数
/// - `button`: 下降沿触发的按键
/// - `id`: 按键编号，决定置位哪个标志
#[embassy_executor::task(pool_size = 2)]
async fn button_edges(mut button: GpioButton<ExtiInput<'static>>, id: ButtonId) {
    loop {
        button.wait_for_press().await;

        let now_us = Instant::now().as_micros();
        if EVENTS.on_falling_edge(id, now_us) {
            defmt::debug!("{} 按下 @ {} us", id, now_us);
        } else {
            defmt::trace!("{} 边沿被消抖丢弃 @ {} us", id, now_us);
        }
    }
}

/// 输出一个周期内发生的状态变化
///
/// # 参数
/// - `report`: `Controller::tick` 返回的本周期报告
fn log_report(report: &TickReport) {
    if let Some((border, green)) = report.joystick_press {
        defmt::info!("边框 {}, 绿色LED {}", border, green);
    }
    if let Some(enabled) = report.button_a_press {
        defmt::info!("红蓝LED {}", if enabled { "启用" } else { "关闭" });
    }
    if let Some(square) = report.square {
        defmt::trace!("方块位置 {}", square);
    }
}
